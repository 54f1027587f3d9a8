pub mod authorization;
pub mod flow;
pub mod jwks;
pub mod jwt;
pub mod middleware;
pub mod routing;
