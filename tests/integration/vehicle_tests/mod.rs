mod flight;
mod network;
mod persistence;
