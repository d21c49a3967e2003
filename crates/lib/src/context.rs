use crate::types::Segment;

/// Joins retrieved units into the context block handed to a language model.
///
/// Units are separated by a blank line, in the order given.
pub fn format_context(units: &[Segment]) -> String {
    units
        .iter()
        .map(|unit| unit.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_context() {
        let units = vec![
            Segment::new("§ 1. Loven gælder.", "§ 1.", "Kapitel 1"),
            Segment::new("§ 34. Depositum.", "§ 34.", "Kapitel 5"),
        ];
        assert_eq!(
            format_context(&units),
            "§ 1. Loven gælder.\n\n§ 34. Depositum."
        );
        assert_eq!(format_context(&[]), "");
    }
}
