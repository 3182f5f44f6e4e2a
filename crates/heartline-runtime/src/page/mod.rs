//! Page lifecycle.
//!
//! A `Page` is one load of a scene's page. Loading starts the ambient
//! particles and the audio session, reveals the page and initializes
//! exactly one scene controller. When the controller asks to continue,
//! the page flushes audio state through the navigator and hands off to the
//! next scene. Every input and every elapsed slice of time goes through
//! here so the scene state stays single-threaded.

mod finale;
mod game;
mod hold;
mod intro;
mod memories;

pub use finale::FinaleScene;
pub use game::HeartGameScene;
pub use hold::HoldScene;
pub use intro::{INTRO_LINE, IntroScene};
pub use memories::MemoriesScene;

use heartline_audio::application::session::{ASSET_ADVISORY_MS, AudioSession, AudioSessionConfig};
use heartline_audio::domain::events::AudioEventKind;
use heartline_core::audio::{AudioOutput, AudioResourceEvent};
use heartline_core::clock::Clock;
use heartline_core::effects::{Effects, ParticleConfig};
use heartline_core::engine::InteractionEngine;
use heartline_core::event::DomainEvent;
use heartline_core::rng::DeterministicRng;
use heartline_core::store::Stores;
use heartline_narrative::domain::navigator::SceneNavigator;
use heartline_narrative::domain::scene::Scene;
use tracing::Span;
use uuid::Uuid;

use crate::config::DEFAULT_MUSIC_ASSET;
use crate::surface::{Element, PageSurface};

/// Collaborators a page works against.
pub struct PageContext<'a> {
    pub stores: Stores<'a>,
    pub clock: &'a dyn Clock,
    pub rng: &'a mut dyn DeterministicRng,
    pub audio: &'a mut dyn AudioOutput,
    pub effects: &'a mut dyn Effects,
    pub surface: &'a mut dyn PageSurface,
}

impl std::fmt::Debug for PageContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext")
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

/// User and resource input delivered to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput {
    /// Click on the scene's begin/next button.
    Continue,
    ActivateTarget(usize),
    PointerDown,
    PointerUp,
    PointerLeave,
    PointerCancel,
    /// Click on one of the final "yes" buttons.
    Accept,
    /// Click on the finale background outside any button.
    BackgroundClick,
    ImageFailed(usize),
    ToggleMute,
    Audio(AudioResourceEvent),
    /// The page is being hidden or backgrounded.
    PageHide,
}

/// Per-run page settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub music_asset: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            music_asset: DEFAULT_MUSIC_ASSET.to_owned(),
        }
    }
}

/// Ambient particle layer shared by every page.
#[must_use]
pub fn ambient_particles() -> ParticleConfig {
    ParticleConfig {
        count: 32,
        colors: vec!["#ff9fbe", "#f6c90e", "#ffd9e6"],
        opacity: (0.1, 0.45),
        size: (1.0, 4.0),
        speed: (0.2, 1.0),
        drift: 0.2,
    }
}

/// Logs every uncommitted event of `engine` before the caller clears them.
fn trace_events<E: InteractionEngine>(engine: &E) {
    for event in engine.uncommitted_events() {
        tracing::debug!(
            engine = engine.engine_name(),
            event_type = event.event_type(),
            sequence = event.metadata().sequence_number,
            page_time_ms = event.metadata().page_time_ms,
            payload = %event.to_payload(),
            "engine event"
        );
    }
}

/// The one scene controller a page runs.
#[derive(Debug)]
pub enum SceneController {
    Intro(IntroScene),
    HeartGame(HeartGameScene),
    Memories(MemoriesScene),
    Hold(HoldScene),
    Finale(FinaleScene),
    /// The page lacks the scene's elements; nothing is initialized.
    Inert,
}

impl SceneController {
    fn init(scene: Scene, ctx: &mut PageContext<'_>) -> Self {
        let controller = match scene {
            Scene::Intro => IntroScene::init(ctx).map(Self::Intro),
            Scene::HeartGame => HeartGameScene::init(ctx).map(Self::HeartGame),
            Scene::Memories => Some(Self::Memories(MemoriesScene::init(ctx))),
            Scene::Hold => HoldScene::init(ctx).map(Self::Hold),
            Scene::Finale => FinaleScene::init(ctx).map(Self::Finale),
        };
        controller.unwrap_or_else(|| {
            tracing::info!(%scene, "scene elements missing; controller not initialized");
            Self::Inert
        })
    }

    /// Returns `true` when the input asks to continue to the next scene.
    fn handle(&mut self, input: PageInput, ctx: &mut PageContext<'_>) -> bool {
        match self {
            Self::Intro(scene) => scene.handle(input),
            Self::HeartGame(scene) => scene.handle(input, ctx),
            Self::Memories(scene) => scene.handle(input, ctx),
            Self::Hold(scene) => scene.handle(input, ctx),
            Self::Finale(scene) => {
                scene.handle(input, ctx);
                false
            }
            Self::Inert => false,
        }
    }

    /// Returns `true` when the elapsed time led to a continue request.
    fn advance(&mut self, elapsed_ms: u64, ctx: &mut PageContext<'_>) -> bool {
        match self {
            Self::Intro(scene) => {
                scene.advance(elapsed_ms, ctx);
                false
            }
            Self::HeartGame(scene) => {
                scene.advance(elapsed_ms, ctx);
                false
            }
            Self::Memories(scene) => {
                scene.advance(elapsed_ms);
                false
            }
            Self::Hold(scene) => scene.advance(elapsed_ms, ctx),
            Self::Finale(scene) => {
                scene.advance(elapsed_ms, ctx);
                false
            }
            Self::Inert => false,
        }
    }

    fn unload(&mut self) {
        if let Self::Finale(scene) = self {
            scene.unload();
        }
    }

    fn is_settled(&self) -> bool {
        match self {
            Self::Intro(scene) => scene.typewriter().is_settled(),
            Self::HeartGame(scene) => scene.game().is_settled(),
            Self::Hold(scene) => scene.hold().is_settled(),
            Self::Finale(scene) => scene.celebration().is_settled(),
            Self::Memories(_) | Self::Inert => true,
        }
    }
}

/// One loaded page.
pub struct Page<'a> {
    id: Uuid,
    scene: Scene,
    span: Span,
    ctx: PageContext<'a>,
    audio: Option<AudioSession>,
    navigator: SceneNavigator,
    controller: SceneController,
    page_time_ms: u64,
}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("scene", &self.scene)
            .field("audio", &self.audio)
            .field("navigator", &self.navigator)
            .field("controller", &self.controller)
            .field("page_time_ms", &self.page_time_ms)
            .finish_non_exhaustive()
    }
}

impl<'a> Page<'a> {
    /// Loads `scene`: particles, then music, then the reveal, then the
    /// scene controller.
    pub fn load(scene: Scene, mut ctx: PageContext<'a>, config: &PageConfig) -> Self {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("page", page_id = %id, scene = %scene);
        let _entered = span.clone().entered();
        tracing::info!(page = scene.page(), "page loaded");

        ctx.effects.init_particles(&ambient_particles());

        let audio = if ctx.surface.has(Element::MusicToggle) {
            let session_config = AudioSessionConfig {
                volume: scene.music_volume(),
                asset_path: config.music_asset.clone(),
            };
            Some(AudioSession::start(
                session_config,
                ctx.audio,
                ctx.stores,
                ctx.clock,
            ))
        } else {
            tracing::debug!("no music toggle on page; audio session skipped");
            None
        };

        let navigator = SceneNavigator::new(ctx.surface.has(Element::TransitionOverlay));
        let controller = SceneController::init(scene, &mut ctx);

        let mut page = Self {
            id,
            scene,
            span,
            ctx,
            audio,
            navigator,
            controller,
            page_time_ms: 0,
        };
        page.apply_events();
        page
    }

    /// Delivers one input. Ignored once the page has handed off.
    pub fn handle(&mut self, input: PageInput) {
        if self.departed_to().is_some() {
            return;
        }
        let _entered = self.span.clone().entered();

        let wants_continue = match input {
            PageInput::ToggleMute => {
                if let Some(session) = self.audio.as_mut() {
                    session.toggle_mute(self.ctx.audio, self.ctx.stores, self.ctx.clock);
                }
                false
            }
            PageInput::Audio(event) => {
                if let Some(session) = self.audio.as_mut() {
                    session.handle_resource_event(
                        event,
                        self.ctx.audio,
                        self.ctx.stores,
                        self.ctx.clock,
                    );
                }
                false
            }
            PageInput::PageHide => {
                self.persist_audio();
                false
            }
            other => self.controller.handle(other, &mut self.ctx),
        };

        if wants_continue {
            self.continue_to_next();
        }
        self.apply_events();
    }

    /// Feeds `elapsed_ms` of page time to every engine on the page.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.departed_to().is_some() {
            return;
        }
        let _entered = self.span.clone().entered();
        self.page_time_ms += elapsed_ms;

        if let Some(session) = self.audio.as_mut() {
            session.advance(elapsed_ms, &*self.ctx.audio, self.ctx.stores, self.ctx.clock);
        }

        self.navigator.advance(elapsed_ms);

        if self.navigator.departed_to().is_none()
            && self.controller.advance(elapsed_ms, &mut self.ctx)
        {
            self.continue_to_next();
        }
        self.apply_events();
    }

    /// Runs the page's unload handlers: a final audio flush, and stopping
    /// any recurring effect.
    pub fn unload(&mut self) {
        let _entered = self.span.clone().entered();
        self.persist_audio();
        self.controller.unload();
        tracing::info!(page_time_ms = self.page_time_ms, "page unloaded");
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    #[must_use]
    pub fn page_time_ms(&self) -> u64 {
        self.page_time_ms
    }

    /// The scene this page handed off to, once the location has changed.
    #[must_use]
    pub fn departed_to(&self) -> Option<Scene> {
        self.navigator.departed_to()
    }

    #[must_use]
    pub fn audio_session(&self) -> Option<&AudioSession> {
        self.audio.as_ref()
    }

    #[must_use]
    pub fn navigator(&self) -> &SceneNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    /// Returns whether no engine on the page has pending timed work.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.navigator.is_settled() && self.controller.is_settled()
    }

    fn persist_audio(&self) {
        if let Some(session) = self.audio.as_ref() {
            session.persist(&*self.ctx.audio, self.ctx.stores, self.ctx.clock);
        }
    }

    fn continue_to_next(&mut self) {
        let Some(target) = self.scene.next() else {
            return;
        };
        let Self {
            navigator,
            audio,
            ctx,
            ..
        } = self;
        navigator.navigate(target, || {
            if let Some(session) = audio.as_ref() {
                session.persist(&*ctx.audio, ctx.stores, ctx.clock);
            }
        });
    }

    fn apply_events(&mut self) {
        if let Some(session) = self.audio.as_mut() {
            for event in session.uncommitted_events() {
                if let AudioEventKind::AssetUnavailable { .. } = event.kind {
                    self.ctx
                        .surface
                        .show_hint(&session.asset_advisory(), ASSET_ADVISORY_MS);
                }
            }
            session.clear_uncommitted_events();
            self.ctx
                .surface
                .set_text(Element::MusicToggle, session.toggle_label(&*self.ctx.audio));
            self.ctx
                .surface
                .set_enabled(Element::MusicToggle, session.toggle_enabled());
        }

        trace_events(&self.navigator);
        self.navigator.clear_uncommitted_events();

        if self.ctx.surface.has(Element::TransitionOverlay) {
            self.ctx
                .surface
                .set_overlay_opacity(self.navigator.overlay_opacity());
        }
    }
}
