pub mod error;

pub mod service {
    pub mod config_service;
    pub mod converter;
    pub mod file;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod conversion;
    pub mod file;
}

pub mod utils {
    pub mod aggregate;
    pub mod convert;
    pub mod path;
    pub mod utils;
}

pub use error::{ConvertError, Result};
pub use facade::conversion_facade::ConversionFacade;
pub use facade::traits::i_conversion::ConversionFacadeTrait;
pub use models::conversion::{BatchReport, ConversionOutcome};
pub use service::file::discover;
pub use service::traits::i_service::DocumentConverter;
pub use utils::aggregate::{aggregate, ResultAggregator};
pub use utils::path::{output_path_for, relative_path};
