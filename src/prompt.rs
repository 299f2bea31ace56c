//! Interactive confirmation used by the command line front end.

use crate::error::Result;
use dialoguer::Confirm;

/// Asks a yes/no question defaulting to "no". `skip` answers "yes" without asking.
pub fn confirm(skip: bool, prompt: impl Into<String>) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
