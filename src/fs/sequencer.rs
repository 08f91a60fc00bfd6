//! Date-ordered sequential naming of freshly downloaded episodes.

use std::io;
use std::path::{Path, PathBuf};

use crate::episode::Episode;
use crate::error::{Error, Result};
use crate::fs::naming::{sanitize_title, sequenced_filename};

/// An episode whose bytes sit under its staging name.
#[derive(Debug, Clone)]
pub struct StagedDownload {
    pub episode: Episode,
    pub staged_path: PathBuf,
}

/// The final name chosen for one staged download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub id: String,
    pub index: usize,
    pub from: PathBuf,
    pub file_name: String,
}

/// Assign sequential filenames to staged downloads.
///
/// Downloads are ordered by publish time ascending; equal times keep their
/// input order. The earliest episode gets `start`, the next `start + 1`, ...
pub fn assign_filenames<S: AsRef<str>>(
    mut downloads: Vec<StagedDownload>,
    start: usize,
    suffixes: &[S],
) -> Vec<PlannedRename> {
    // sort_by_key is stable
    downloads.sort_by_key(|d| d.episode.published);

    downloads
        .into_iter()
        .enumerate()
        .map(|(offset, download)| {
            let index = start + offset;
            let title = sanitize_title(&download.episode.title, suffixes);
            PlannedRename {
                id: download.episode.id,
                index,
                from: download.staged_path,
                file_name: sequenced_filename(index, &title),
            }
        })
        .collect()
}

/// Move a staged file to its final name inside `folder`.
///
/// Never overwrites: an existing target leaves the staged file in place.
pub fn apply_rename(folder: &Path, plan: &PlannedRename) -> Result<PathBuf> {
    let target = folder.join(&plan.file_name);

    if target.exists() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Target already exists: {}", target.display()),
        )));
    }

    std::fs::rename(&plan.from, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::MediaLocation;
    use chrono::NaiveDate;

    fn staged(id: &str, title: &str, y: i32, m: u32, d: u32) -> StagedDownload {
        StagedDownload {
            episode: Episode::on_date(
                id,
                title,
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                MediaLocation::Direct(format!("https://cdn.example.com/{}.mp3", id)),
            ),
            staged_path: PathBuf::from(format!("/tmp/pending_{}.mp3", id)),
        }
    }

    const NO_SUFFIXES: &[&str] = &[];

    #[test]
    fn test_orders_by_date() {
        let downloads = vec![
            staged("c", "Third", 2024, 1, 3),
            staged("a", "First", 2024, 1, 1),
            staged("b", "Second", 2024, 1, 2),
        ];

        let plan = assign_filenames(downloads, 1, NO_SUFFIXES);
        let names: Vec<_> = plan.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["001_First.mp3", "002_Second.mp3", "003_Third.mp3"]
        );
        assert_eq!(plan[0].id, "a");
        assert_eq!(plan[0].from, PathBuf::from("/tmp/pending_a.mp3"));
    }

    #[test]
    fn test_continues_numbering() {
        let downloads = vec![staged("x", "Neu", 2024, 3, 1)];
        let plan = assign_filenames(downloads, 8, NO_SUFFIXES);
        assert_eq!(plan[0].file_name, "008_Neu.mp3");
        assert_eq!(plan[0].index, 8);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let downloads = vec![
            staged("first", "A", 2024, 1, 1),
            staged("second", "B", 2024, 1, 1),
            staged("early", "C", 2023, 12, 31),
        ];
        let plan = assign_filenames(downloads, 1, NO_SUFFIXES);
        let ids: Vec<_> = plan.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "first", "second"]);
    }

    #[test]
    fn test_empty_plan() {
        assert!(assign_filenames(Vec::new(), 1, NO_SUFFIXES).is_empty());
    }

    #[test]
    fn test_apply_rename() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("pending_a.mp3");
        std::fs::write(&from, b"audio").unwrap();

        let plan = PlannedRename {
            id: "a".to_string(),
            index: 1,
            from: from.clone(),
            file_name: "001_First.mp3".to_string(),
        };

        let target = apply_rename(dir.path(), &plan).unwrap();
        assert_eq!(target, dir.path().join("001_First.mp3"));
        assert!(!from.exists());
        assert_eq!(std::fs::read(&target).unwrap(), b"audio");
    }

    #[test]
    fn test_apply_rename_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("pending_a.mp3");
        std::fs::write(&from, b"new").unwrap();
        std::fs::write(dir.path().join("001_First.mp3"), b"old").unwrap();

        let plan = PlannedRename {
            id: "a".to_string(),
            index: 1,
            from: from.clone(),
            file_name: "001_First.mp3".to_string(),
        };

        let err = apply_rename(dir.path(), &plan).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::AlreadyExists));
        assert!(from.exists());
        assert_eq!(
            std::fs::read(dir.path().join("001_First.mp3")).unwrap(),
            b"old"
        );
    }
}
