mod fixtures;
mod hooks;
mod options;
mod structs;
