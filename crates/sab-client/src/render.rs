//! Plain-text rendering of the form state for terminals.

use std::fmt::Write;

use sab_core::Address;

use crate::form::FormState;

/// Column headers, in display order.
pub const COLUMNS: [&str; 5] = ["Address Line 1", "City", "State", "Country", "PIN Code"];

fn cells(address: &Address) -> [&str; 5] {
    [
        address.address_line1.as_str(),
        address.city.as_str(),
        address.state.as_str(),
        address.country.as_str(),
        address.pin_code.as_str(),
    ]
}

/// The address table, one row per address, columns padded to the widest
/// cell.
pub fn render_table(addresses: &[Address]) -> String {
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for address in addresses {
        for (width, cell) in widths.iter_mut().zip(cells(address)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_row(&mut out, &rule, &widths);
    for address in addresses {
        push_row(&mut out, &cells(address), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Banner line (when set) followed by the address table.
pub fn render(state: &FormState) -> String {
    let mut out = String::new();
    if let Some(banner) = state.banner() {
        let _ = writeln!(out, "! {banner}");
    }
    if state.addresses().is_empty() {
        out.push_str("No addresses saved.\n");
    } else {
        out.push_str(&render_table(state.addresses()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::LOAD_FAILED_BANNER;
    use sab_core::AddressId;

    fn address(line1: &str, city: &str) -> Address {
        Address {
            id: AddressId::new(),
            address_line1: line1.into(),
            city: city.into(),
            state: "Delhi".into(),
            country: "India".into(),
            pin_code: "110001".into(),
        }
    }

    #[test]
    fn header_lists_columns_in_order() {
        let table = render_table(&[]);
        let header = table.lines().next().unwrap();
        assert_eq!(
            header,
            "Address Line 1 | City | State | Country | PIN Code"
        );
    }

    #[test]
    fn rows_follow_column_order() {
        let table = render_table(&[address("1 Janpath", "New Delhi")]);
        let row = table.lines().nth(2).unwrap();
        let cells: Vec<&str> = row.split(" | ").map(str::trim).collect();
        assert_eq!(cells, ["1 Janpath", "New Delhi", "Delhi", "India", "110001"]);
    }

    #[test]
    fn columns_widen_to_fit() {
        let table = render_table(&[address("A very long street line", "X")]);
        let widths: Vec<usize> = table.lines().map(|l| l.find(" | ").unwrap()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn banner_precedes_table() {
        let mut state = FormState::new("India");
        state.load_failed();
        let out = render(&state);
        assert_eq!(out.lines().next(), Some(format!("! {LOAD_FAILED_BANNER}").as_str()));
        assert!(out.contains("No addresses saved."));
    }
}
