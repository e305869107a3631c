use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ws_types::{PageChange, WsMessage};
use crate::board::Board;
use crate::models::{GoalTier, PodiumEntry, SellerRecord};
use crate::ranking::PeriodTotals;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SellerView {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub score_day: String,
    pub score_week: String,
    pub score_month: String,
    pub score_year: String,
    pub deals_month: u32,
    pub goal_label: String,
    pub goal_value: String,
    pub goal_target: String,
    pub goal_percent: String,
    pub goal_bar_percent: String,
    pub goal_tier: GoalTier,
}

impl From<&SellerRecord> for SellerView {
    fn from(s: &SellerRecord) -> Self {
        Self {
            rank: s.rank,
            id: s.id.to_string(),
            name: s.name.clone(),
            avatar_url: s.avatar_url.clone(),
            score_day: s.score_day.to_string(),
            score_week: s.score_week.to_string(),
            score_month: s.score_month.to_string(),
            score_year: s.score_year.to_string(),
            deals_month: s.deals_month,
            goal_label: s.goal_label.clone(),
            goal_value: s.goal_value.to_string(),
            goal_target: s.goal_target.to_string(),
            goal_percent: s.goal_percent().to_string(),
            goal_bar_percent: s.goal_bar_percent().to_string(),
            goal_tier: s.goal_tier(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PodiumView {
    pub place: u32,
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub score: String,
}

impl From<&PodiumEntry> for PodiumView {
    fn from(p: &PodiumEntry) -> Self {
        Self {
            place: p.place,
            id: p.id.to_string(),
            name: p.name.clone(),
            avatar_url: p.avatar_url.clone(),
            score: p.score.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsView {
    pub day: String,
    pub week: String,
    pub month: String,
    pub year: String,
    pub deals_month: u32,
}

impl From<PeriodTotals> for TotalsView {
    fn from(t: PeriodTotals) -> Self {
        Self {
            day: t.day.to_string(),
            week: t.week.to_string(),
            month: t.month.to_string(),
            year: t.year.to_string(),
            deals_month: t.deals_month,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub sellers: Vec<SellerView>,
    pub podium: Vec<PodiumView>,
    pub totals: TotalsView,
    pub last_update: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub loading: bool,
}

fn render(board: &Board, sellers: &[SellerRecord]) -> LeaderboardResponse {
    let paginator = board.paginator();
    LeaderboardResponse {
        page: paginator.page(),
        total_pages: paginator.total_pages(),
        page_size: paginator.page_size(),
        sellers: sellers.iter().map(SellerView::from).collect(),
        podium: board.podium().iter().map(PodiumView::from).collect(),
        totals: board.totals().into(),
        last_update: board.last_update(),
        error: board.error().map(str::to_string),
        loading: board.is_loading(),
    }
}

/// GET /api/leaderboard: Current page of the ranking plus board state.
pub async fn current_page(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    let board = state.board.read().await;
    Json(render(&board, board.current_page()))
}

/// GET /api/leaderboard/all: Full ranking, unpaginated.
pub async fn all(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    let board = state.board.read().await;
    let snapshot = board.snapshot();
    Json(render(&board, snapshot.entries()))
}

/// POST /api/leaderboard/page/next
pub async fn next_page(State(state): State<AppState>) -> Json<PageChange> {
    let change = {
        let mut board = state.board.write().await;
        let page = board.next_page();
        PageChange {
            page,
            total_pages: board.paginator().total_pages(),
        }
    };
    let _ = state.ws_tx.send(WsMessage::PageChange(change.clone()));
    Json(change)
}

/// POST /api/leaderboard/page/prev
pub async fn prev_page(State(state): State<AppState>) -> Json<PageChange> {
    let change = {
        let mut board = state.board.write().await;
        let page = board.prev_page();
        PageChange {
            page,
            total_pages: board.paginator().total_pages(),
        }
    };
    let _ = state.ws_tx.send(WsMessage::PageChange(change.clone()));
    Json(change)
}
