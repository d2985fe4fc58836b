//! Progress reporting for synthesis requests

pub mod reporter;
