mod handler;
mod model;

pub use handler::get_portfolio;
pub use model::PortfolioPayload;
