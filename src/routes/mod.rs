// # Routes Module
//
// - This module contains all HTTP route handlers for the Pings Server.
// - Routes are organized by functionality into separate submodules.
//
// ## Adding New Routes
// - 1. Create a new file in the `routes/` directory
// - 2. Add the module declaration here with `pub mod module_name;`
// - 3. Register the routes in `server.rs` using the Router

/// Health check and monitoring endpoints
pub mod health;

/// Ping recording and query endpoints
pub mod pings;
