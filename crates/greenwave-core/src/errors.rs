use thiserror::Error;

/// Result type alias using GreenWaveError
pub type Result<T> = std::result::Result<T, GreenWaveError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the store or the engine carries one of these
/// kinds, each mapped to a stable `ERR_*` code for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    DuplicateEmail,
    NotFound,
    InvalidRequest,
    CapacityExceeded,
    AccessDenied,
    AlreadyCancelled,

    // Auth
    Unauthorised,
    Forbidden,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateEmail => "ERR_DUPLICATE_EMAIL",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidRequest => "ERR_INVALID_REQUEST",
            ExErrorKind::CapacityExceeded => "ERR_CAPACITY_EXCEEDED",
            ExErrorKind::AccessDenied => "ERR_ACCESS_DENIED",
            ExErrorKind::AlreadyCancelled => "ERR_ALREADY_CANCELLED",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, entity id,
/// message) for debugging. The store and engine layers return this type.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for GreenWave operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GreenWaveError {
    // ===== Registration / Auth =====
    /// An account with this email already exists (case-insensitive)
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    /// Unknown email or wrong password; the two are deliberately indistinguishable
    #[error("Invalid email or password")]
    AuthenticationFailed,

    /// Caller lacks the admin role
    #[error("Account {account_id} is not an administrator")]
    Forbidden { account_id: String },

    // ===== Lookup =====
    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: String },

    #[error("Ticket not found: {ticket_id}")]
    TicketNotFound { ticket_id: String },

    #[error("Workshop not found: {workshop_id}")]
    WorkshopNotFound { workshop_id: String },

    #[error("Reservation not found: {reservation_id}")]
    ReservationNotFound { reservation_id: String },

    #[error("Exhibition not found: {exhibition_id}")]
    ExhibitionNotFound { exhibition_id: String },

    // ===== Validation =====
    /// Malformed ticket type, missing selection, or other bad input
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Workshop has no free seats
    #[error("No seats available in workshop {workshop_id} (capacity {capacity})")]
    CapacityExceeded { workshop_id: String, capacity: u32 },

    /// Ticket does not cover the workshop's exhibition
    #[error("Ticket {ticket_id} does not grant access to exhibition {exhibition_id}")]
    AccessDenied {
        ticket_id: String,
        exhibition_id: String,
    },

    /// Ticket presented by an account that does not own it
    #[error("Ticket {ticket_id} is not owned by account {account_id}")]
    TicketNotOwned {
        ticket_id: String,
        account_id: String,
    },

    /// Reservation is already in its terminal state
    #[error("Reservation already cancelled: {reservation_id}")]
    AlreadyCancelled { reservation_id: String },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GreenWaveError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        GreenWaveError::InvalidRequest {
            reason: reason.into(),
        }
    }
}

/// Conversion from GreenWaveError to ExError
impl From<GreenWaveError> for ExError {
    fn from(err: GreenWaveError) -> Self {
        let message = err.to_string();
        match err {
            GreenWaveError::DuplicateEmail { email } => ExError::new(ExErrorKind::DuplicateEmail)
                .with_entity_id(email)
                .with_message(message),

            GreenWaveError::AuthenticationFailed => {
                ExError::new(ExErrorKind::Unauthorised).with_message(message)
            }

            GreenWaveError::Forbidden { account_id } => ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(account_id)
                .with_message(message),

            GreenWaveError::AccountNotFound { account_id: id }
            | GreenWaveError::TicketNotFound { ticket_id: id }
            | GreenWaveError::WorkshopNotFound { workshop_id: id }
            | GreenWaveError::ReservationNotFound { reservation_id: id }
            | GreenWaveError::ExhibitionNotFound { exhibition_id: id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(id)
                    .with_message(message)
            }

            GreenWaveError::InvalidRequest { .. } => {
                ExError::new(ExErrorKind::InvalidRequest).with_message(message)
            }

            GreenWaveError::CapacityExceeded { workshop_id, .. } => {
                ExError::new(ExErrorKind::CapacityExceeded)
                    .with_entity_id(workshop_id)
                    .with_message(message)
            }

            GreenWaveError::AccessDenied { ticket_id, .. }
            | GreenWaveError::TicketNotOwned { ticket_id, .. } => {
                ExError::new(ExErrorKind::AccessDenied)
                    .with_entity_id(ticket_id)
                    .with_message(message)
            }

            GreenWaveError::AlreadyCancelled { reservation_id } => {
                ExError::new(ExErrorKind::AlreadyCancelled)
                    .with_entity_id(reservation_id)
                    .with_message(message)
            }

            GreenWaveError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            GreenWaveError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
