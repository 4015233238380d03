//! Suite and per-case hooks around an in-process server and its test database.
//!
//! A [`TestServer`] moves through `Stopped → Running → Seeded → Running → Stopped`:
//! [`TestServer::start`] ignites the service over the test database, each case is
//! seeded by [`TestServer::before_each`] and wiped by [`TestServer::after_each`],
//! and [`TestServer::stop`] releases the server. [`TestServer::case`] bundles the
//! per-case hooks into a guard so the wipe also runs when a case panics.
//!
//! Servers over a file-backed database hold a process-wide lock from start until
//! stop, so parallel test threads sharing one file run their cases one suite at a
//! time. In-memory databases are private to each server and skip the lock.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use rocket::local::blocking::Client;
use rusqlite::Connection;

use crate::config::{Config, IN_MEMORY};
use crate::error::LifecycleError;
use crate::models::BlogPost;
use crate::{create_rocket, db, logging, seeder, DbPool, DbPoolExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Running,
    Seeded,
}

impl LifecycleState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Seeded => "seeded",
        }
    }
}

static SHARED_DATABASE: Mutex<()> = Mutex::new(());

pub struct TestServer {
    client: Option<Client>,
    state: LifecycleState,
    seed_count: usize,
    // Declared last so it is released after the client is dropped.
    shared: Option<MutexGuard<'static, ()>>,
}

impl TestServer {
    /// Starts over the test database named by the environment.
    pub fn from_env() -> Result<Self, LifecycleError> {
        Self::start(&Config::from_env()?)
    }

    /// Opens the test database and ignites the service over it.
    pub fn start(config: &Config) -> Result<Self, LifecycleError> {
        logging::init_for_tests();

        let shared = if config.test_database_path == IN_MEMORY {
            None
        } else {
            Some(SHARED_DATABASE.lock().unwrap_or_else(|e| e.into_inner()))
        };

        let conn = db::open(&config.test_database_path)?;
        let client = Client::tracked(create_rocket(conn)).map_err(|e| LifecycleError::Ignite(e.to_string()))?;
        tracing::info!(database = %config.test_database_path, "test server started");

        Ok(Self {
            client: Some(client),
            state: LifecycleState::Running,
            seed_count: config.seed_count,
            shared,
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    fn invalid(&self, action: &'static str) -> LifecycleError {
        LifecycleError::InvalidTransition { action, state: self.state.name() }
    }

    pub fn client(&self) -> Result<&Client, LifecycleError> {
        self.client.as_ref().ok_or_else(|| self.invalid("dispatch requests"))
    }

    /// Direct handle on the store the server is using.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, LifecycleError> {
        let pool = self
            .client()?
            .rocket()
            .state::<DbPool>()
            .ok_or(LifecycleError::Unmanaged)?;
        Ok(pool.conn())
    }

    pub fn before_each(&mut self) -> Result<Vec<BlogPost>, LifecycleError> {
        if self.state != LifecycleState::Running {
            return Err(self.invalid("seed"));
        }
        let posts = {
            let mut conn = self.conn()?;
            seeder::seed_with(&mut conn, self.seed_count)?
        };
        self.state = LifecycleState::Seeded;
        Ok(posts)
    }

    /// Drops the test database whether or not the case seeded it.
    pub fn after_each(&mut self) -> Result<(), LifecycleError> {
        if self.state == LifecycleState::Stopped {
            return Err(self.invalid("wipe the database"));
        }
        {
            let conn = self.conn()?;
            db::drop_database(&conn)?;
        }
        self.state = LifecycleState::Running;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), LifecycleError> {
        if self.state != LifecycleState::Running {
            return Err(self.invalid("stop"));
        }
        self.client = None;
        self.shared = None;
        self.state = LifecycleState::Stopped;
        tracing::info!("test server stopped");
        Ok(())
    }

    /// Seeds and returns a guard that wipes the database when dropped.
    pub fn case(&mut self) -> Result<Case<'_>, LifecycleError> {
        let seeded = self.before_each()?;
        Ok(Case { server: self, seeded, finished: false })
    }
}

/// One test case in progress.
pub struct Case<'a> {
    server: &'a mut TestServer,
    seeded: Vec<BlogPost>,
    finished: bool,
}

impl Case<'_> {
    /// Posts inserted by the seeder for this case.
    pub fn seeded(&self) -> &[BlogPost] {
        &self.seeded
    }

    /// Runs the after-each hook, reporting its failure instead of logging it.
    pub fn finish(mut self) -> Result<(), LifecycleError> {
        self.finished = true;
        self.server.after_each()
    }
}

impl Deref for Case<'_> {
    type Target = TestServer;

    fn deref(&self) -> &TestServer {
        self.server
    }
}

impl DerefMut for Case<'_> {
    fn deref_mut(&mut self) -> &mut TestServer {
        self.server
    }
}

impl Drop for Case<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.server.after_each() {
            tracing::error!(error = %e, "after-each hook failed");
        }
    }
}
