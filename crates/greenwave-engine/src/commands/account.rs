//! Account registration, login and admin provisioning.

use std::time::Instant;

use greenwave_core::credential::CredentialVerifier;
use greenwave_core::errors::{ExError, GreenWaveError};
use greenwave_core::model::{generate_id, Account, Role};
use greenwave_core::{log_op_end, log_op_error, log_op_start};
use greenwave_core_types::Sensitive;
use greenwave_store::errors::Result;
use greenwave_store::Store;

use super::{domain_error, elapsed_ms};
use crate::config::AdminConfig;

const OP_CREATE_ACCOUNT: &str = "create_account";
const OP_AUTHENTICATE: &str = "authenticate";
const OP_ENSURE_ADMIN: &str = "ensure_admin";

/// Register a new attendee account
///
/// The email is stored trimmed; uniqueness ignores case.
///
/// # Errors
/// * `InvalidRequest` - Blank name or an email without `@`
/// * `DuplicateEmail` - The email is already registered
/// * `Io` / `Serialization` - The account could not be persisted
pub fn create_account(
    store: &mut Store,
    verifier: &dyn CredentialVerifier,
    name: &str,
    email: &str,
    password: &Sensitive<String>,
) -> Result<Account> {
    let start = Instant::now();
    log_op_start!(OP_CREATE_ACCOUNT);

    let result = register(store, verifier, name, email, password, Role::Attendee)
        .map_err(|e| e.with_op(OP_CREATE_ACCOUNT));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(account) => {
            log_op_end!(
                OP_CREATE_ACCOUNT,
                duration_ms = duration_ms,
                account_id = account.id.as_str()
            );
        }
        Err(e) => log_op_error!(OP_CREATE_ACCOUNT, e, duration_ms = duration_ms),
    }
    result
}

fn register(
    store: &mut Store,
    verifier: &dyn CredentialVerifier,
    name: &str,
    email: &str,
    password: &Sensitive<String>,
    role: Role,
) -> Result<Account> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() {
        return Err(GreenWaveError::invalid_request("Name must not be blank").into());
    }
    if !email.contains('@') {
        return Err(
            GreenWaveError::invalid_request(format!("Not an email address: {}", email)).into(),
        );
    }
    if store.find_account_by_email(email).is_some() {
        return Err(GreenWaveError::DuplicateEmail {
            email: email.to_string(),
        }
        .into());
    }

    let account = Account::new(
        generate_id('U'),
        name.to_string(),
        email.to_string(),
        verifier.hash(password.expose()),
        role,
    );
    store.add_account(account.clone())?;
    Ok(account)
}

/// Resolve an email/password pair to its account
///
/// Unknown emails and wrong passwords fail identically.
///
/// # Errors
/// * `Unauthorised` - No account matches the credentials
pub fn authenticate(
    store: &Store,
    verifier: &dyn CredentialVerifier,
    email: &str,
    password: &Sensitive<String>,
) -> Result<Account> {
    let start = Instant::now();
    log_op_start!(OP_AUTHENTICATE);

    let result = store
        .find_account_by_email(email)
        .filter(|account| account.check_credential(verifier, password.expose()))
        .cloned()
        .ok_or(GreenWaveError::AuthenticationFailed)
        .map_err(domain_error(OP_AUTHENTICATE));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(account) => {
            log_op_end!(
                OP_AUTHENTICATE,
                duration_ms = duration_ms,
                account_id = account.id.as_str()
            );
        }
        Err(e) => log_op_error!(OP_AUTHENTICATE, e, duration_ms = duration_ms),
    }
    result
}

/// Make sure the configured administrator exists
///
/// Idempotent: an existing admin with the configured email is returned
/// unchanged, password included.
///
/// # Errors
/// * `InvalidRequest` - The email belongs to an attendee account
/// * `Io` / `Serialization` - The admin account could not be persisted
pub fn ensure_admin(
    store: &mut Store,
    verifier: &dyn CredentialVerifier,
    admin: &AdminConfig,
) -> Result<Account> {
    let start = Instant::now();
    log_op_start!(OP_ENSURE_ADMIN);

    let existing = store.find_account_by_email(&admin.email).cloned();
    let result = match existing {
        Some(account) if account.is_admin() => Ok(account),
        Some(account) => Err(ExError::from(GreenWaveError::invalid_request(format!(
            "Admin email {} is registered to attendee {}",
            admin.email, account.id
        )))),
        None => register(
            store,
            verifier,
            &admin.name,
            &admin.email,
            &admin.password,
            Role::Admin,
        ),
    }
    .map_err(|e| e.with_op(OP_ENSURE_ADMIN));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(account) => {
            log_op_end!(
                OP_ENSURE_ADMIN,
                duration_ms = duration_ms,
                account_id = account.id.as_str()
            );
        }
        Err(e) => log_op_error!(OP_ENSURE_ADMIN, e, duration_ms = duration_ms),
    }
    result
}
