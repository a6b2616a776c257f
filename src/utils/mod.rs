pub mod output;
pub mod pipeline;
pub mod reshape;
pub mod settings;
pub mod unicatt;

#[cfg(test)]
pub mod stub_server;
