pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod error;
pub mod github {
    pub mod client;
    pub mod fetch;
    pub mod issues;
    pub mod publish;
}
pub mod output;
pub mod ranking;
pub mod render;
pub mod run;
