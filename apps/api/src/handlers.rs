pub mod health;
pub mod roles;
pub mod templates;

#[cfg(test)]
mod test_support;
