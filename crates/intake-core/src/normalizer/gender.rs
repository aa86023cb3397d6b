//! Gender inference from a first name.
//!
//! Lookup tables first (male before female), then a suffix heuristic:
//! names ending in `a` or `e` are female, anything else is male. The heuristic
//! is a fixed rule, not a linguistic claim.

use std::collections::HashSet;

use crate::models::Gender;

const MALE_NAMES: &[&str] = &[
    "Abel", "Carlos", "Eduardo", "Fernando", "Gustavo", "Henrique", "João", "Lucas", "Miguel",
    "Pedro", "Ricardo", "Samuel", "Tiago", "Vitor", "Yuri", "Renê", "Noa", "Fabrízio", "Ícaro",
    "Denis", "Luis", "Marcos", "Rodrigo", "André", "Matheus", "Felipe", "Danilo", "Gabriel",
    "Leonardo", "Rafael", "Bruno",
];

const FEMALE_NAMES: &[&str] = &[
    "Ana", "Beatriz", "Carla", "Daniela", "Elaine", "Fernanda", "Gabriela", "Helena", "Isabela",
    "Juliana", "Karla", "Larissa", "Mariana", "Natália", "Priscila", "Renata", "Tatiane",
    "Vanessa", "Dominique", "Evelyn", "Celeste", "Amarílis", "Laís", "Ísis", "Camila",
    "Patrícia", "Jéssica", "Lorena", "Sabrina", "Viviane", "Anny", "Emily", "Kelly", "Jenny",
    "Lilly", "Agnes", "Eloise", "Yasmin", "Yasmim", "Miriam", "Jasmim",
];

/// Classifies first names using static tables plus optional extras.
#[derive(Debug, Clone)]
pub struct GenderClassifier {
    male: HashSet<String>,
    female: HashSet<String>,
}

impl Default for GenderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl GenderClassifier {
    /// Create a classifier with the built-in name tables.
    pub fn new() -> Self {
        Self {
            male: MALE_NAMES.iter().map(|n| n.to_lowercase()).collect(),
            female: FEMALE_NAMES.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    /// Add a first name to the male table.
    pub fn add_male_name(&mut self, name: &str) {
        self.male.insert(name.trim().to_lowercase());
    }

    /// Add a first name to the female table.
    pub fn add_female_name(&mut self, name: &str) {
        self.female.insert(name.trim().to_lowercase());
    }

    /// Classify by the first word of `name`. `None` for a blank name.
    pub fn classify(&self, name: &str) -> Option<Gender> {
        let first = name.split_whitespace().next()?.to_lowercase();

        if self.male.contains(&first) {
            return Some(Gender::Male);
        }
        if self.female.contains(&first) {
            return Some(Gender::Female);
        }

        match first.chars().last() {
            Some('a') | Some('e') => Some(Gender::Female),
            _ => Some(Gender::Male),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        let classifier = GenderClassifier::new();
        assert_eq!(classifier.classify("João Da Silva"), Some(Gender::Male));
        assert_eq!(classifier.classify("ícaro"), Some(Gender::Male));
        assert_eq!(classifier.classify("NATÁLIA souza"), Some(Gender::Female));
        assert_eq!(classifier.classify("Evelyn"), Some(Gender::Female));
    }

    #[test]
    fn test_table_overrides_suffix() {
        let classifier = GenderClassifier::new();
        // Would be female by suffix
        assert_eq!(classifier.classify("Noa"), Some(Gender::Male));
        assert_eq!(classifier.classify("Renê"), Some(Gender::Male));
        // Would be male by suffix
        assert_eq!(classifier.classify("Miriam"), Some(Gender::Female));
        assert_eq!(classifier.classify("Kelly"), Some(Gender::Female));
    }

    #[test]
    fn test_suffix_fallback() {
        let classifier = GenderClassifier::new();
        assert_eq!(classifier.classify("Jurema"), Some(Gender::Female));
        assert_eq!(classifier.classify("Cleide"), Some(Gender::Female));
        assert_eq!(classifier.classify("Otávio"), Some(Gender::Male));
        assert_eq!(classifier.classify("Wagner"), Some(Gender::Male));
        assert_eq!(classifier.classify("Ramis"), Some(Gender::Male));
        // Accented endings are not 'a' or 'e'
        assert_eq!(classifier.classify("Josué"), Some(Gender::Male));
    }

    #[test]
    fn test_custom_names() {
        let mut classifier = GenderClassifier::new();
        assert_eq!(classifier.classify("Luca"), Some(Gender::Female));
        classifier.add_male_name("Luca");
        assert_eq!(classifier.classify("luca"), Some(Gender::Male));

        classifier.add_female_name(" Ingrid ");
        assert_eq!(classifier.classify("Ingrid"), Some(Gender::Female));
    }

    #[test]
    fn test_blank_name() {
        let classifier = GenderClassifier::new();
        assert_eq!(classifier.classify("   "), None);
    }
}
