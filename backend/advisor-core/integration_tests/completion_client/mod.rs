mod complete;
mod models;
