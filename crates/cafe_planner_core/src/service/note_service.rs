//! Quick-note use-case service. Notes are created and deleted only.

use crate::model::note::{Note, NoteId};
use crate::model::theme::Theme;
use crate::repo::CollectionRepository;
use crate::service::ServiceResult;
use log::info;

pub struct NoteService<R: CollectionRepository<Item = Note>> {
    repo: R,
}

impl<R: CollectionRepository<Item = Note>> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Pins a new note from quick entry.
    pub fn create_note(&self, content: &str, theme: Theme, now_ms: i64) -> ServiceResult<Note> {
        let note = Note::new(content, theme, now_ms);
        self.repo.put(&note)?;
        info!(
            "event=note_create module=service status=ok theme={}",
            theme.as_str()
        );
        Ok(note)
    }

    pub fn delete_note(&self, id: NoteId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=note_delete module=service status=ok");
        Ok(())
    }

    /// Notes newest first, as pinned on the board.
    pub fn list_notes(&self) -> ServiceResult<Vec<Note>> {
        let mut notes = self.repo.get_all()?;
        notes.reverse();
        Ok(notes)
    }
}
