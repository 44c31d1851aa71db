//! Operator-facing report of the startup seed.

use std::io::Write;

use muac_db::seed::SeedOutcome;

/// Log what seeding did and hand a generated admin password to `out`.
///
/// The password itself never goes through `tracing`.
pub fn announce_seed_outcome<W: Write>(
    outcome: &SeedOutcome,
    admin_username: &str,
    out: &mut W,
) -> std::io::Result<()> {
    match outcome {
        SeedOutcome::Fresh {
            counts,
            generated_admin_password,
        } => {
            tracing::info!(?counts, "Reference data seeded");
            if let Some(password) = generated_admin_password {
                tracing::warn!(
                    username = %admin_username,
                    "Generated administrator password; it must be changed at first login"
                );
                writeln!(
                    out,
                    "Generated password for '{admin_username}': {}",
                    password.expose()
                )?;
                writeln!(out, "It is shown only once and must be changed at first login.")?;
            }
        }
        SeedOutcome::Reconciled(report) => {
            tracing::info!(warnings = report.warnings(), "Reference data reconciled");
        }
    }
    Ok(())
}
