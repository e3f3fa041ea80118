pub mod flow;
pub mod handle;
pub mod session;
pub mod settings;

#[cfg(test)]
pub mod stub;
