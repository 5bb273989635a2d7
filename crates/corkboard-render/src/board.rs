//! A mounted board: load outcome in, interaction hooks and renderers out.
//!
//! `Board` is the headless stand-in for the page controller. It owns the scene, the viewport and
//! the modal; every hook is a no-op on a board that fell back to the error message.

use crate::html::{render_board_html, render_fallback_html};
use crate::modal::{CloseTrigger, DetailModal};
use crate::scene::{Card, EntityIndex, Scene, build_scene};
use crate::svg::{SvgRenderOptions, render_svg};
use crate::viewport::{PointerId, Viewport, ViewportRect};
use crate::{Error, Result};
use corkboard_core::{
    BoardConfig, Connection, Dataset, Entity, EntityLookup, LoadFailure, LoadOutcome,
    build_connection_map, build_connections,
};
use corkboard_layout::{BoardLayout, Point, layout_dataset};
use indexmap::IndexMap;

#[derive(Debug)]
pub struct LiveBoard {
    dataset: Dataset,
    layout: BoardLayout,
    edges: Vec<Connection>,
    connection_map: IndexMap<String, Vec<String>>,
    scene: Scene,
    viewport: Viewport,
    modal: DetailModal,
}

impl LiveBoard {
    fn build(dataset: Dataset, rect: ViewportRect, config: &BoardConfig) -> Self {
        let layout = layout_dataset(&dataset, &config.layout);
        let edges = build_connections(&dataset.persons, &dataset.extra_connections);
        let connection_map = {
            let lookup = EntityLookup::new(&dataset.persons, &dataset.evidence);
            build_connection_map(&edges, &lookup)
        };
        let scene = build_scene(&dataset, &layout, &edges, &config.scene);
        let mut viewport = Viewport::new(config.viewport.clone(), rect);
        viewport.fit(layout.width, layout.height, rect);
        tracing::debug!(
            persons = dataset.persons.len(),
            evidence = dataset.evidence.len(),
            edges = edges.len(),
            threads = scene.threads.len(),
            "board mounted"
        );
        Self {
            dataset,
            layout,
            edges,
            connection_map,
            scene,
            viewport,
            modal: DetailModal::new(config.modal.clone()),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn edges(&self) -> &[Connection] {
        &self.edges
    }

    pub fn connection_map(&self) -> &IndexMap<String, Vec<String>> {
        &self.connection_map
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn modal(&self) -> &DetailModal {
        &self.modal
    }

    fn open_item(&mut self, id: &str) -> bool {
        let Some(card) = self.scene.card(id) else {
            tracing::debug!(id, "click on unknown item ignored");
            return false;
        };
        let index = card.entity;
        self.open_entity(id, index)
    }

    /// Opens the record behind a specific card, so cards sharing an id stay distinct.
    fn open_entity(&mut self, id: &str, index: EntityIndex) -> bool {
        let Some(entity) = entity_of(&self.dataset, index) else {
            return false;
        };
        // Only persons list their connections.
        let names: &[String] = match entity {
            Entity::Person(_) => self
                .connection_map
                .get(id)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            Entity::Evidence(_) => &[],
        };
        self.modal.open_entity_detail(entity, names);
        true
    }

    fn item_at(&self, client: Point) -> Option<&Card> {
        let p = self.viewport.screen_to_board(client);
        self.scene.card_at(p)
    }
}

fn entity_of(dataset: &Dataset, index: EntityIndex) -> Option<Entity<'_>> {
    match index {
        EntityIndex::Person(i) => dataset.persons.get(i).map(Entity::Person),
        EntityIndex::Evidence(i) => dataset.evidence.get(i).map(Entity::Evidence),
    }
}

#[derive(Debug)]
pub enum BoardState {
    Ready(Box<LiveBoard>),
    Fallback {
        message: String,
        failure: LoadFailure,
    },
}

#[derive(Debug)]
pub struct Board {
    container_id: String,
    state: BoardState,
}

impl Board {
    /// Mounts a board into `container_id`. A failed load yields the fallback board, which has
    /// no viewport or modal.
    pub fn mount(
        container_id: impl Into<String>,
        outcome: LoadOutcome,
        rect: ViewportRect,
        config: &BoardConfig,
    ) -> Self {
        let container_id = container_id.into();
        let state = match outcome {
            LoadOutcome::Loaded(dataset) => {
                BoardState::Ready(Box::new(LiveBoard::build(dataset, rect, config)))
            }
            LoadOutcome::Failed(failure) => {
                tracing::warn!(
                    container = %container_id,
                    origin = %failure.origin,
                    error = %failure.error,
                    "showing fallback board"
                );
                BoardState::Fallback {
                    message: config.fallback_message.clone(),
                    failure,
                }
            }
        };
        Self {
            container_id,
            state,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, BoardState::Ready(_))
    }

    pub fn live(&self) -> Option<&LiveBoard> {
        match &self.state {
            BoardState::Ready(live) => Some(&**live),
            BoardState::Fallback { .. } => None,
        }
    }

    fn live_mut(&mut self) -> Option<&mut LiveBoard> {
        match &mut self.state {
            BoardState::Ready(live) => Some(&mut **live),
            BoardState::Fallback { .. } => None,
        }
    }

    pub fn fallback_message(&self) -> Option<&str> {
        match &self.state {
            BoardState::Fallback { message, .. } => Some(message),
            BoardState::Ready(_) => None,
        }
    }

    /// Opens the detail modal for the item with `id`. Returns false when nothing opened.
    pub fn click_item(&mut self, id: &str) -> bool {
        self.live_mut().is_some_and(|live| live.open_item(id))
    }

    /// Click at a client position: opens the top-most item under it, if any.
    pub fn click_at(&mut self, client: Point) -> Option<String> {
        let live = self.live_mut()?;
        let (id, index) = live.item_at(client).map(|c| (c.id.clone(), c.entity))?;
        live.open_entity(&id, index).then_some(id)
    }

    pub fn wheel(&mut self, client: Point, delta_y: f64) {
        if let Some(live) = self.live_mut() {
            live.viewport.wheel(client, delta_y);
        }
    }

    pub fn pointer_down(&mut self, id: PointerId, client: Point) {
        if let Some(live) = self.live_mut() {
            let on_item = live.item_at(client).is_some();
            live.viewport.pointer_down(id, client, on_item);
        }
    }

    pub fn pointer_move(&mut self, id: PointerId, client: Point) {
        if let Some(live) = self.live_mut() {
            live.viewport.pointer_move(id, client);
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        if let Some(live) = self.live_mut() {
            live.viewport.pointer_up(id);
        }
    }

    pub fn pointer_cancel(&mut self, id: PointerId) {
        if let Some(live) = self.live_mut() {
            live.viewport.pointer_cancel(id);
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(live) = self.live_mut() {
            live.viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(live) = self.live_mut() {
            live.viewport.zoom_out();
        }
    }

    pub fn reset_view(&mut self) {
        if let Some(live) = self.live_mut() {
            live.viewport.reset();
        }
    }

    pub fn resize(&mut self, rect: ViewportRect) {
        if let Some(live) = self.live_mut() {
            live.viewport.set_rect(rect);
        }
    }

    pub fn key(&mut self, key: &str) -> bool {
        self.live_mut().is_some_and(|live| live.modal.handle_key(key))
    }

    pub fn close_modal(&mut self, trigger: CloseTrigger) {
        if let Some(live) = self.live_mut() {
            live.modal.close(trigger);
        }
    }

    pub fn render_html(&self) -> String {
        match &self.state {
            BoardState::Ready(live) => {
                render_board_html(&self.container_id, &live.scene, &live.viewport, &live.modal)
            }
            BoardState::Fallback { message, .. } => {
                render_fallback_html(&self.container_id, message)
            }
        }
    }

    pub fn render_svg(&self, options: &SvgRenderOptions) -> Result<String> {
        match &self.state {
            BoardState::Ready(live) => render_svg(&live.scene, options),
            BoardState::Fallback { message, .. } => Err(Error::NoBoard {
                message: message.clone(),
            }),
        }
    }
}
