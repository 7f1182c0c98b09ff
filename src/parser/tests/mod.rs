mod script;
mod tokens;
