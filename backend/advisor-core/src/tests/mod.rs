mod completion_error;
mod context;
mod credential;
mod wire;
