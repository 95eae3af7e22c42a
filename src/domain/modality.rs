/// Font Awesome classes keyed by a fragment of the modality name.
///
/// Checked in order; the first fragment found in the lowercased name wins.
const ICONS: &[(&[&str], &str)] = &[
    (&["futsal", "futebol"], "fas fa-futbol"),
    (&["vôlei", "volei"], "fas fa-volleyball-ball"),
    (&["basquete"], "fas fa-basketball-ball"),
    (&["tênis", "tenis"], "fas fa-table-tennis"),
    (&["xadrez"], "fas fa-chess"),
    (&["queimada"], "fas fa-dumbbell"),
    (&["atletismo"], "fas fa-running"),
    (&["handebol"], "fas fa-hand-rock"),
    (&["cerimônia", "abertura"], "fas fa-bullhorn"),
];

const DEFAULT_ICON: &str = "fas fa-futbol";

/// The icon class shown next to a modality.
#[must_use]
pub fn icon_for(modality: &str) -> &'static str {
    let modality = modality.to_lowercase();
    ICONS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| modality.contains(f)))
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::icon_for;

    #[test_case("Futsal Masculino", "fas fa-futbol"; "futsal")]
    #[test_case("Vôlei Misto", "fas fa-volleyball-ball"; "volei accented")]
    #[test_case("VOLEI", "fas fa-volleyball-ball"; "volei upper")]
    #[test_case("Basquetebol", "fas fa-basketball-ball"; "basquete")]
    #[test_case("Tênis de mesa", "fas fa-table-tennis"; "tenis")]
    #[test_case("Xadrez", "fas fa-chess"; "xadrez")]
    #[test_case("Cerimônia de Abertura", "fas fa-bullhorn"; "cerimonia")]
    #[test_case("Corrida de saco", "fas fa-futbol"; "unknown falls back")]
    fn picks_icon(modality: &str, expected: &str) {
        assert_eq!(icon_for(modality), expected);
    }
}
