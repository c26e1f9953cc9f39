//! Library side of the `duo-stroom` command-line tool.

pub mod kpi;
pub mod logging;
pub mod session;
