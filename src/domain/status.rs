use std::fmt;

use strum::{EnumMessage, EnumString, IntoStaticStr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoStaticStr, EnumString, EnumMessage)]
pub enum StatusCode {
    #[strum(serialize = "200", message = "OK")]
    Ok,
    #[strum(serialize = "404", message = "Not Found")]
    NotFound,
    #[strum(serialize = "501", message = "Not Implemented")]
    NotImplemented,
}

impl StatusCode {
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn reason(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }
}

/// `<code> <reason>`, the text shared by the status line and the request log.
impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}
