/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (with serde defaults for
/// optional vars) and call `Config::from_env()` at startup.
///
/// # Panics
///
/// Panics if any required env var is missing or cannot be deserialized.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }
}
