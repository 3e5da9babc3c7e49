// Domain layer: discovery models and the ports (traits) that fetchers, parsers,
// filters and storage backends implement.

pub mod model;
pub mod ports;
