use crate::config::Config;
use crate::sink::{Sink, WriteTask};
use anyhow::{Context, Result};
use log::{debug, info};
use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::Consistency;
use scylla::statement::prepared::PreparedStatement;

pub const TABLE: &str = "cassandradd";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cassandradd (
    id UUID PRIMARY KEY,
    random TEXT
)";

const INSERT_ROW: &str = "INSERT INTO cassandradd (id, random) VALUES (?, ?)";

/// [`Sink`] backed by a CQL session bound to the configured keyspace
pub struct CassandraSink {
    session: Session,
    insert: PreparedStatement,
}

impl CassandraSink {
    /// connects to the node named in `cfg`, creates the target table if needed and
    /// prepares the insert statement
    pub async fn connect(cfg: &Config) -> Result<Self> {
        let node = cfg.contact_point()?;
        let keyspace = cfg.keyspace()?;

        let profile = ExecutionProfile::builder()
            .consistency(Consistency::One)
            .build();

        info!("connecting to {node}, keyspace {keyspace}");
        let session = SessionBuilder::new()
            .known_node(&node)
            .use_keyspace(keyspace, false)
            .default_execution_profile_handle(profile.into_handle())
            .build()
            .await
            .with_context(|| format!("error connecting to cassandra at {node}"))?;

        ensure_table(&session).await?;

        let insert = session
            .prepare(INSERT_ROW)
            .await
            .context("failed to prepare insert statement")?;

        Ok(Self { session, insert })
    }
}

pub async fn ensure_table(session: &Session) -> Result<()> {
    session
        .query_unpaged(CREATE_TABLE, ())
        .await
        .context("failed to create table")?;
    debug!("table {TABLE} is ready");
    Ok(())
}

impl Sink for CassandraSink {
    async fn write(&self, task: WriteTask) -> Result<()> {
        self.session
            .execute_unpaged(&self.insert, (task.id, task.payload))
            .await
            .with_context(|| format!("error inserting row {} into {TABLE}", task.id))?;
        Ok(())
    }
}
