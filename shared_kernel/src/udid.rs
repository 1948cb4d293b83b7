use crate::string_key;

string_key!(Udid);
