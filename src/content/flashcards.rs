use crate::domain::Flashcard;

const DECK: [(&str, &str); 2] = [
    ("Loop", "A programming structure that repeats code."),
    ("Variable", "A storage placeholder for values."),
];

/// The flashcard deck for `subject`. Only one deck exists so far.
pub fn flashcards(_subject: &str) -> Vec<Flashcard> {
    DECK.iter()
        .map(|(term, definition)| Flashcard {
            term: term.to_string(),
            definition: definition.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_is_fixed() {
        let cards = flashcards("OOP");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].term, "Loop");
        assert_eq!(cards[1].definition, "A storage placeholder for values.");
        assert_eq!(cards, flashcards("anything else"));
    }
}
