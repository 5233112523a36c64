//! File-backed cookie jar.
//!
//! One cookie per line, rewritten in full on every write. Plain reads take a
//! shared `fs2` lock. Writes and [`CookieJar::update`] hold an exclusive lock
//! from the read to the rewrite, so two `whoami` processes sharing the file
//! never interleave a read-modify-write.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use tracing::debug;

use super::store::CookieTable;
use crate::adapters::SystemClock;
use crate::domain::{SetCookie, VisitError};
use crate::ports::{Clock, CookieJar};

/// Cookie jar persisted at a path.
pub struct FileCookieJar {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileCookieJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Jar whose expiry uses `clock`.
    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, VisitError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?)
    }

    fn rewrite(&self, file: &mut File, table: &CookieTable) -> Result<(), VisitError> {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(table.to_text().as_bytes())?;
        file.sync_all()?;
        debug!(path = %self.path.display(), cookies = table.len(), "cookie jar written");
        Ok(())
    }

    /// Run `edit` on the table under an exclusive lock and write the result.
    fn locked_edit(
        &self,
        edit: impl FnOnce(&mut CookieTable, DateTime<Utc>) -> Result<(), VisitError>,
    ) -> Result<(), VisitError> {
        let now = self.clock.now();
        let mut file = self.open()?;
        file.lock_exclusive()?;
        let result = Self::read_table(&mut file).and_then(|mut table| {
            edit(&mut table, now)?;
            table.purge(now);
            self.rewrite(&mut file, &table)
        });
        file.unlock()?;
        result
    }

    fn read_table(file: &mut File) -> Result<CookieTable, VisitError> {
        let mut text = String::new();
        file.seek(SeekFrom::Start(0))?;
        file.read_to_string(&mut text)?;
        Ok(CookieTable::from_text(&text))
    }
}

impl CookieJar for FileCookieJar {
    fn is_enabled(&self) -> bool {
        true
    }

    fn cookie_header(&self) -> Result<String, VisitError> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        let mut file = File::open(&self.path)?;
        file.lock_shared()?;
        let table = Self::read_table(&mut file);
        file.unlock()?;
        Ok(table?.header(self.clock.now()))
    }

    fn set_cookie(&self, line: &str) -> Result<(), VisitError> {
        let cookie = SetCookie::parse(line)?;
        self.locked_edit(|table, now| {
            table.apply(cookie, now);
            Ok(())
        })
    }

    fn update(
        &self,
        derive: &mut dyn FnMut(&str) -> Result<String, VisitError>,
    ) -> Result<(), VisitError> {
        self.locked_edit(|table, now| {
            let line = derive(&table.header(now))?;
            table.apply(SetCookie::parse(&line)?, now);
            Ok(())
        })
    }
}
