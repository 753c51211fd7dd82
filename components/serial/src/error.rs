use lightboard_platform::Vector;
use lightboard_queue::QueueError;
use thiserror::Error;

/// Error types for serial channel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerialError {
    #[error("Channel used before configure()")]
    NotConfigured,

    #[error("Channel already configured")]
    AlreadyConfigured,

    #[error("Receive queue is empty")]
    EmptyQueue,

    #[error("Transmitter not ready after {spins} polls")]
    TransmitTimeout { spins: u32 },

    #[error("Invalid baud divisor {divisor} (valid: 1..={max})")]
    InvalidBaudDivisor { divisor: u32, max: u32 },

    #[error("No handler registered for vector {vector}")]
    VectorNotRegistered { vector: Vector },

    #[error("Vector {vector} already registered")]
    VectorAlreadyRegistered { vector: Vector },

    #[error("Vector {vector} out of range")]
    VectorOutOfRange { vector: Vector },
}

impl From<QueueError> for SerialError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Empty => SerialError::EmptyQueue,
        }
    }
}

pub type Result<T> = core::result::Result<T, SerialError>;
