//! Table rendering of a search session.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Color, Style, Theme, object::Rows},
};
use thiserror::Error;

use crate::search::{OptionSelection, OptionSet, SearchSession};

/// Errors raised while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Output could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

struct Row {
    selected: bool,
    family: &'static str,
    name: String,
    code: String,
    detail: String,
}

/// Write every option in `session` as a table, marking the selected rows.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub fn write_session(mut out: impl io::Write, session: &SearchSession) -> Result<(), ReportError> {
    let rows = collect_rows(&session.options, session.selection);

    if rows.is_empty() {
        writeln!(out, "Inga alternativ")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Typ", "Namn", "Kod", "Detaljer"]);

    for row in rows {
        builder.push_record([
            if row.selected { "●" } else { "" }.to_string(),
            row.family.to_string(),
            row.name,
            row.code,
            row.detail,
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")?;

    Ok(())
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn collect_rows(options: &OptionSet, selection: OptionSelection) -> Vec<Row> {
    let mut rows = Vec::new();

    rows.extend(options.properties.iter().map(|option| Row {
        selected: selection.property == Some(option.id),
        family: "Fastighet",
        name: option.designation.clone(),
        code: option.code.clone(),
        detail: String::new(),
    }));

    rows.extend(options.buildings.iter().map(|option| Row {
        selected: selection.building == Some(option.id),
        family: "Byggnad",
        name: option.name.clone(),
        code: option.code.clone(),
        detail: text(option.building_type_name.as_ref()),
    }));

    rows.extend(options.staircases.iter().map(|option| Row {
        selected: selection.staircase == Some(option.id),
        family: "Uppgång",
        name: option.name.clone(),
        code: text(option.code.as_ref()),
        detail: if option.accessible_by_elevator {
            "Hiss".to_string()
        } else {
            String::new()
        },
    }));

    rows.extend(options.rental_properties.iter().map(|option| Row {
        selected: selection.rental_property == Some(option.id),
        family: "Hyresobjekt",
        name: option.name.clone(),
        code: text(option.code.as_ref()),
        detail: text(option.address.as_ref()),
    }));

    rows.extend(options.maintenance_units.iter().map(|option| Row {
        selected: selection.maintenance_unit == Some(option.id),
        family: "Underhållsenhet",
        name: option.name.clone(),
        code: text(option.code.as_ref()),
        detail: text(option.unit_type.as_ref()),
    }));

    rows.extend(options.leases.iter().map(|option| Row {
        selected: selection.lease == Some(option.id),
        family: "Kontrakt",
        name: option.name.clone(),
        code: text(option.lease_number.as_ref()),
        detail: text(option.lease_type.as_ref()),
    }));

    rows.extend(options.tenants.iter().map(|option| Row {
        selected: selection.tenant == Some(option.id),
        family: "Hyresgäst",
        name: option.name.clone(),
        code: option.contact_code.clone(),
        detail: text(option.phone_number.as_ref()),
    }));

    rows.extend(options.parking_spaces.iter().map(|option| Row {
        selected: selection.parking_space == Some(option.id),
        family: "Bilplats",
        name: option.name.clone(),
        code: text(option.code.as_ref()),
        detail: option.address.clone(),
    }));

    rows.extend(options.facilities.iter().map(|option| Row {
        selected: selection.facility == Some(option.id),
        family: "Lokal",
        name: option.name.clone(),
        code: text(option.code.as_ref()),
        detail: text(option.type_name.as_ref()),
    }));

    rows
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::search::{OptionId, TenantOption};

    fn tenant(name: &str, contact_code: &str) -> TenantOption {
        TenantOption {
            id: OptionId::new(),
            name: name.to_string(),
            contact_code: contact_code.to_string(),
            contact_key: None,
            national_registration_number: None,
            email_address: None,
            phone_number: Some("0702222222".to_string()),
            is_tenant: true,
            special_attention: false,
        }
    }

    #[test]
    fn marks_selected_rows() -> TestResult {
        let anna = tenant("Anna Berg", "P100001");
        let nils = tenant("Nils Ek", "P200002");
        let mut session = SearchSession::default();

        session.selection.tenant = Some(nils.id);
        session.options.tenants = vec![anna, nils];

        let mut out = Vec::new();

        write_session(&mut out, &session)?;

        let rendered = String::from_utf8(out)?;
        let selected: Vec<_> = rendered.lines().filter(|line| line.contains('●')).collect();

        assert_eq!(selected.len(), 1, "exactly one row is selected");
        assert!(
            selected.first().is_some_and(|line| line.contains("Nils Ek")),
            "selected row is the chosen tenant"
        );
        assert!(rendered.contains("Hyresgäst"), "family column is rendered");

        Ok(())
    }

    #[test]
    fn empty_session_says_so() -> TestResult {
        let mut out = Vec::new();

        write_session(&mut out, &SearchSession::default())?;

        assert_eq!(String::from_utf8(out)?, "Inga alternativ\n");

        Ok(())
    }
}
