use inlinable_string::InlinableString;

use crate::NodeId;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is invalid.", _0)]
    NodeHandleInvalid(NodeId),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(display = "{} can not be attached under its own descendant {}.", _0, _1)]
    CanNotAttachToDescendant(NodeId, NodeId),
    #[fail(display = "Semi-axes of ellipse must be positive, got ({}, {}).", _0, _1)]
    InvalidSemiAxes(f32, f32),
    #[fail(display = "Motion parameter `{}` must be finite.", _0)]
    NonFiniteParameter(&'static str),
    #[fail(display = "Body name `{}` is used more than once.", _0)]
    DuplicateBodyName(InlinableString),
    #[fail(display = "Orbit path requires at least one sample step.")]
    InvalidPathSteps,
    #[fail(display = "{}", _0)]
    Io(#[cause] std::io::Error),
    #[fail(display = "{}", _0)]
    Settings(#[cause] serde_json::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Settings(err)
    }
}
