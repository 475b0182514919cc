mod common;
mod routing;
mod stores;
