use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::map::dtos::{MapRefreshDto, MapSessionDto};
use crate::features::map::error::MapError;
use crate::features::map::session::MapSession;
use crate::features::map::svg::Viewport;
use crate::modules::supabase::RecordStore;

type SharedSession = Arc<Mutex<MapSession>>;

#[derive(Default)]
struct SessionTable {
    sessions: HashMap<Uuid, SharedSession>,
    /// Insertion order, oldest first
    order: VecDeque<Uuid>,
}

impl SessionTable {
    fn get(&self, id: Uuid) -> Result<SharedSession> {
        self.sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| MapError::SessionNotFound(id).into())
    }

    fn insert(&mut self, session: MapSession, capacity: usize) {
        while self.sessions.len() >= capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            tracing::debug!("Evicting map session {}", oldest);
            self.sessions.remove(&oldest);
        }
        self.order.push_back(session.id);
        self.sessions
            .insert(session.id, Arc::new(Mutex::new(session)));
    }

    fn remove(&mut self, id: Uuid) -> Option<SharedSession> {
        self.order.retain(|queued| *queued != id);
        self.sessions.remove(&id)
    }
}

/// Holds live map sessions.
///
/// The table lock only guards lookups. Each session has its own mutex, held
/// for the whole operation, so a refresh and a selection on the same session
/// never interleave while a slow fetch for one session leaves the others free.
pub struct MapService {
    store: Arc<dyn RecordStore>,
    sessions: RwLock<SessionTable>,
    max_sessions: usize,
}

impl MapService {
    pub fn new(store: Arc<dyn RecordStore>, max_sessions: usize) -> Self {
        Self {
            store,
            sessions: RwLock::new(SessionTable::default()),
            max_sessions: max_sessions.max(1),
        }
    }

    async fn session(&self, id: Uuid) -> Result<SharedSession> {
        self.sessions.read().await.get(id)
    }

    /// Opens a session and loads its sites.
    ///
    /// A failed initial load still yields a session; the error is reported in
    /// `loadError` and a later refresh may succeed.
    pub async fn create(&self, viewport: Viewport) -> Result<MapSessionDto> {
        let mut session = MapSession::new(viewport);
        if let Err(e) = session.refresh(self.store.as_ref()).await {
            tracing::warn!("Map session {} opened without sites: {}", session.id, e);
        }
        let snapshot = MapSessionDto::from(&session);

        self.sessions
            .write()
            .await
            .insert(session, self.max_sessions);

        tracing::info!("Map session created: id={}", snapshot.id);
        Ok(snapshot)
    }

    pub async fn get(&self, id: Uuid) -> Result<MapSessionDto> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(MapSessionDto::from(&*session))
    }

    pub async fn refresh(&self, id: Uuid) -> Result<MapRefreshDto> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;

        let report = session.refresh(self.store.as_ref()).await?;
        Ok(MapRefreshDto {
            report,
            session: MapSessionDto::from(&*session),
        })
    }

    pub async fn select(&self, id: Uuid, site_id: Option<Uuid>) -> Result<MapSessionDto> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;

        session.select(site_id)?;
        Ok(MapSessionDto::from(&*session))
    }

    pub async fn render_svg(&self, id: Uuid) -> Result<String> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(session.render_svg())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MapError::SessionNotFound(id).into())
    }
}
