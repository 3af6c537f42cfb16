use crate::error::AdminServiceError;

/// Guard for the "at least one administrator" invariant.
///
/// `holds_admin` says whether the affected user currently has the administrator
/// role, `keeps_admin` whether they still will after the change, and
/// `admin_count` is the current number of administrators. Callers must read the
/// count under the same lock that covers the subsequent write.
pub fn ensure_admin_remains(
    holds_admin: bool,
    keeps_admin: bool,
    admin_count: u64,
) -> Result<(), AdminServiceError> {
    if holds_admin && !keeps_admin && admin_count <= 1 {
        return Err(AdminServiceError::LastAdministrator);
    }
    Ok(())
}
