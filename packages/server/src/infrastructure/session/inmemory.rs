//! InMemory Session Store 実装
//!
//! セッション／アイデンティティプロバイダは本来この層の外部コラボレータです。
//! このインメモリ実装はシングルプロセス運用とテストのための代替で、
//! トークン → ユーザーとワークスペースメンバーシップを保持します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{AuthError, SessionStore, UserId, UserRef, WorkspaceSlug};

/// インメモリ Session Store 実装
pub struct InMemorySessionStore {
    /// セッショントークン → 認証済みユーザー
    sessions: Mutex<HashMap<String, UserRef>>,
    /// ワークスペース → メンバーのユーザー ID
    members: Mutex<HashMap<WorkspaceSlug, HashSet<UserId>>>,
}

impl InMemorySessionStore {
    /// 新しい空の InMemorySessionStore を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            members: Mutex::new(HashMap::new()),
        }
    }

    /// セッションを登録（シード・テスト用）
    pub async fn insert_session(&self, token: impl Into<String>, user: UserRef) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.into(), user);
    }

    /// ワークスペースメンバーを登録（シード・テスト用）
    pub async fn add_member(&self, workspace: WorkspaceSlug, user_id: UserId) {
        let mut members = self.members.lock().await;
        members.entry(workspace).or_default().insert(user_id);
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn authenticate(&self, token: &str) -> Result<UserRef, AuthError> {
        let sessions = self.sessions.lock().await;
        sessions.get(token).cloned().ok_or(AuthError::InvalidToken)
    }

    async fn is_workspace_member(&self, user_id: &UserId, workspace: &WorkspaceSlug) -> bool {
        let members = self.members.lock().await;
        members
            .get(workspace)
            .map(|m| m.contains(user_id))
            .unwrap_or(false)
    }
}
