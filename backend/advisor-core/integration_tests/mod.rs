mod completion_client;
mod helpers;
mod retry;
