//! Tri-state container for the outcome of a gateway call.

use std::fmt;

/// What a front-end renders for one request: still waiting, a value, or a
/// user-facing error message. There is no partial state.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    /// Collapse a fallible result, replacing any error with `message`.
    pub fn from_result<E>(result: Result<T, E>, message: &str) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(_) => Resource::Error(message.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Resource::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Error(message) => Resource::Error(message),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Loading => write!(f, "Loading..."),
            Resource::Success(data) => write!(f, "{}", data),
            Resource::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_result_hides_the_underlying_error() {
        let failed: Result<u32, std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "socket closed"));
        let resource = Resource::from_result(failed, "Something went wrong");

        assert_eq!(resource, Resource::Error("Something went wrong".to_string()));
        assert_eq!(resource.error_message(), Some("Something went wrong"));
    }

    #[test]
    fn test_map_preserves_state() {
        assert_eq!(Resource::Success(2).map(|n| n * 10), Resource::Success(20));
        assert_eq!(Resource::<u32>::Loading.map(|n| n * 10), Resource::Loading);
        assert_eq!(
            Resource::<u32>::Error("nope".to_string()).map(|n| n * 10),
            Resource::Error("nope".to_string())
        );
    }

    #[test]
    fn test_accessors() {
        let ok = Resource::Success("pikachu");
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&"pikachu"));
        assert!(Resource::<()>::Loading.is_loading());
        assert!(Resource::<()>::Error(String::new()).is_error());
        assert_eq!(Resource::<()>::Loading.into_data(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Resource::Success(7).to_string(), "7");
        assert_eq!(Resource::<u8>::Loading.to_string(), "Loading...");
        assert_eq!(Resource::<u8>::Error("boom".into()).to_string(), "Error: boom");
    }
}
