//! Probability table rendering for the help output.

use fairdice_core::{Die, ProbabilityTable};

/// Render the full pairwise win-probability matrix as fixed-point
/// percentages with aligned columns.
pub fn render(dice: &[Die]) -> String {
    let table = ProbabilityTable::build(dice);
    let labels: Vec<String> = dice
        .iter()
        .enumerate()
        .map(|(i, die)| format!("#{i} [{die}]"))
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str("Win probability of each die (row) against each die (column):\n");
    out.push_str(&format!("{:label_width$}", ""));
    for i in 0..dice.len() {
        out.push_str(&format!(" {:>7}", format!("#{i}")));
    }
    out.push('\n');
    for (row, label) in labels.iter().enumerate() {
        out.push_str(&format!("{label:<label_width$}"));
        for col in 0..dice.len() {
            out.push_str(&format!(" {:>6.2}%", table.probability(row, col) * 100.0));
        }
        out.push('\n');
    }
    out.push_str("Ties count for neither side, so a die against itself sits at or below 50%.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdice_core::parse_dice;

    #[test]
    fn test_render_worked_example() {
        let dice = parse_dice(["2,2,4,4,9,9", "1,1,6,6,8,8"]).unwrap();
        let rendered = render(&dice);

        assert!(rendered.contains("#0 [2,2,4,4,9,9]"));
        assert!(rendered.contains("#1 [1,1,6,6,8,8]"));
        // 20/36 and 16/36
        assert!(rendered.contains("55.56%"));
        assert!(rendered.contains("44.44%"));
    }

    #[test]
    fn test_render_columns_align() {
        let dice = parse_dice(["1,2,3", "10,20,30,40"]).unwrap();
        let rendered = render(&dice);
        let rows: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with('#'))
            .collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), rows[1].len());
    }
}
