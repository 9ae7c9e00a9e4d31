use poem_openapi::Object;

/// JSON error body carried by every failing response.
#[derive(Object, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
