//! Process-local classroom boards: the teacher's announcement and the doubt queue.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The single advisory string shown to students. Last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    /// Bumped on every write, including rewrites of identical text.
    pub revision: u64,
}

impl Announcement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
        }
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }
}

/// A question raised by a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doubt {
    pub id: u64,
    pub text: String,
    pub raised_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoubtBoard {
    doubts: Vec<Doubt>,
    next_id: u64,
}

impl DoubtBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut board = Self::new();
        for text in texts {
            let text = text.into();
            if !text.trim().is_empty() {
                board.push(text.trim().to_string(), None);
            }
        }
        board
    }

    pub fn raise(&mut self, text: &str, raised_by: Option<&str>) -> Result<&Doubt, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyDoubt);
        }
        Ok(self.push(text.to_string(), raised_by.map(str::to_string)))
    }

    /// Remove a doubt once it has been answered. Returns it if it was present.
    pub fn resolve(&mut self, id: u64) -> Option<Doubt> {
        let idx = self.doubts.iter().position(|d| d.id == id)?;
        Some(self.doubts.remove(idx))
    }

    pub fn get(&self, id: u64) -> Option<&Doubt> {
        self.doubts.iter().find(|d| d.id == id)
    }

    pub fn list(&self) -> &[Doubt] {
        &self.doubts
    }

    pub fn len(&self) -> usize {
        self.doubts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doubts.is_empty()
    }

    fn push(&mut self, text: String, raised_by: Option<String>) -> &Doubt {
        self.next_id += 1;
        self.doubts.push(Doubt {
            id: self.next_id,
            text,
            raised_by,
        });
        // just pushed
        &self.doubts[self.doubts.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_last_write_wins() {
        let mut a = Announcement::new("EagleWise Live: Bhaiya is here!");
        a.replace("Class starts now");
        a.replace("Break for 5 minutes");
        assert_eq!(a.text, "Break for 5 minutes");
        assert_eq!(a.revision, 2);
    }

    #[test]
    fn test_rewriting_same_text_still_bumps_revision() {
        let mut a = Announcement::new("x");
        a.replace("x");
        assert_eq!(a.revision, 1);
    }

    #[test]
    fn test_seeded_board_skips_blank_entries() {
        let board = DoubtBoard::seeded(["Structure of Nephron?", "  ", "Krebs cycle yield?"]);
        let texts: Vec<&str> = board.list().iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["Structure of Nephron?", "Krebs cycle yield?"]);
    }

    #[test]
    fn test_raise_and_resolve() {
        let mut board = DoubtBoard::new();
        let id = board.raise("  Why is the sky blue? ", Some("Aman")).unwrap().id;
        assert_eq!(board.get(id).unwrap().text, "Why is the sky blue?");
        assert_eq!(board.get(id).unwrap().raised_by.as_deref(), Some("Aman"));

        let resolved = board.resolve(id).unwrap();
        assert_eq!(resolved.id, id);
        assert!(board.is_empty());
        assert!(board.resolve(id).is_none());
    }

    #[test]
    fn test_empty_doubt_rejected() {
        let mut board = DoubtBoard::new();
        assert_eq!(board.raise("   ", None).unwrap_err(), ValidationError::EmptyDoubt);
        assert_eq!(board.len(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut board = DoubtBoard::seeded(["a"]);
        let first = board.list()[0].id;
        board.resolve(first);
        let second = board.raise("b", None).unwrap().id;
        assert_ne!(first, second);
    }
}
