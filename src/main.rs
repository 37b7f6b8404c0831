//! HeroDex - browse Dota 2 heroes, their abilities and popular items

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use herodex::action::Action;
use herodex::api::ApiClient;
use herodex::components::{
    Component, Footer, FooterProps, HeroGrid, HeroGridProps, HeroModal, HeroModalProps,
    SearchBar, SearchBarProps,
};
use herodex::config::{
    Config, Endpoints, ReferencePolicy, DEFAULT_CONSTANTS_URL, DEFAULT_STATS_URL,
};
use herodex::effect::Effect;
use herodex::error::FetchError;
use herodex::logging;
use herodex::reducer::reducer;
use herodex::resolve;
use herodex::state::{AppState, LOADING_ANIM_TICK_MS};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Dota 2 hero browser
#[derive(Parser, Debug)]
#[command(name = "herodex")]
#[command(about = "Browse Dota 2 heroes, their abilities and popular items")]
struct Args {
    /// Hero statistics endpoint
    #[arg(long, default_value = DEFAULT_STATS_URL)]
    stats_url: String,

    /// Base URL of the dotaconstants build directory
    #[arg(long, default_value = DEFAULT_CONSTANTS_URL)]
    constants_url: String,

    /// When to fetch ability and item reference data
    #[arg(long, value_enum, default_value_t = ReferencePolicy::LoadOnce)]
    reference_policy: ReferencePolicy,

    /// JSON file mapping hero keys to popular item keys
    #[arg(long)]
    popular_items: Option<PathBuf>,

    /// Write tracing output to this file (filter with HERODEX_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            endpoints: Endpoints::new(&self.stats_url, &self.constants_url),
            reference_policy: self.reference_policy,
            popular_items: self.popular_items.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum HeroComponentId {
    Grid,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum HeroContext {
    Grid,
    Search,
    Detail,
}

impl EventRoutingState<HeroComponentId, HeroContext> for AppState {
    fn focused(&self) -> Option<HeroComponentId> {
        if self.detail.open {
            Some(HeroComponentId::Detail)
        } else if self.search.active {
            Some(HeroComponentId::Search)
        } else {
            Some(HeroComponentId::Grid)
        }
    }

    fn modal(&self) -> Option<HeroComponentId> {
        if self.detail.open {
            Some(HeroComponentId::Detail)
        } else if self.search.active {
            Some(HeroComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: HeroComponentId) -> HeroContext {
        match id {
            HeroComponentId::Grid => HeroContext::Grid,
            HeroComponentId::Search => HeroContext::Search,
            HeroComponentId::Detail => HeroContext::Detail,
        }
    }

    fn default_context(&self) -> HeroContext {
        HeroContext::Grid
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config();
    logging::init(config.log_file.as_deref())?;
    tracing::info!(
        stats_url = %config.endpoints.stats_url,
        constants_url = %config.endpoints.constants_url,
        policy = ?config.reference_policy,
        "starting herodex"
    );

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let policy = config.reference_policy;
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(policy))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);
    let client = Arc::new(ApiClient::from_config(&config));

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;
    tracing::info!("herodex exited");

    Ok(())
}

struct HeroDexUi {
    grid: HeroGrid,
    search: SearchBar,
    detail: HeroModal,
    footer: Footer,
}

impl HeroDexUi {
    fn new() -> Self {
        Self {
            grid: HeroGrid::new(),
            search: SearchBar,
            detail: HeroModal::new(),
            footer: Footer::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<HeroComponentId>,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Search
            Constraint::Min(3),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area);

        event_ctx.set_component_area(HeroComponentId::Search, chunks[0]);
        self.search.render(
            frame,
            chunks[0],
            SearchBarProps {
                query: &state.search.query,
                active: state.search.active,
                is_focused: render_ctx.is_focused() && state.search.active,
            },
        );

        event_ctx.set_component_area(HeroComponentId::Grid, chunks[1]);
        self.grid.render(
            frame,
            chunks[1],
            HeroGridProps {
                state,
                is_focused: render_ctx.is_focused() && !state.search.active && !state.detail.open,
            },
        );

        self.footer.render(frame, chunks[2], FooterProps { state });

        if state.detail.open {
            event_ctx.set_component_area(HeroComponentId::Detail, area);
            self.detail.render(
                frame,
                area,
                HeroModalProps {
                    detail: &state.detail,
                    tick: state.tick,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&HeroComponentId::Detail);
        }
    }

    fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = HeroGridProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.grid.handle_event(event, props).into_iter().collect();
        respond(actions, false)
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            query: &state.search.query,
            active: state.search.active,
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        respond(actions, true)
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = HeroModalProps {
            detail: &state.detail,
            tick: state.tick,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        respond(actions, true)
    }
}

/// Modal handlers swallow every event so nothing leaks to the grid.
fn respond(actions: Vec<Action>, modal: bool) -> HandlerResponse<Action> {
    if actions.is_empty() && !modal {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: Arc<ApiClient>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(HeroDexUi::new()));
    let mut bus: EventBus<AppState, Action, HeroComponentId, HeroContext> = EventBus::new();
    let keybindings: Keybindings<HeroContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(HeroComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(HeroComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(HeroComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&client)),
        )
        .await
}

/// Log a failed fetch with the HTTP status or body problem that caused it.
fn log_fetch_failure(task: &'static str, err: &FetchError) {
    if err.is_parse() {
        tracing::error!(task, error = %err, "unexpected response body");
    } else if let Some(status) = err.status() {
        tracing::error!(task, status = status.as_u16(), error = %err, "request rejected");
    } else {
        tracing::error!(task, error = %err, "request failed");
    }
}

/// Handle effects by spawning keyed tasks; a new task replaces the old one
/// under the same key.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: Arc<ApiClient>) {
    match effect {
        Effect::LoadHeroes => {
            ctx.tasks().spawn("heroes", async move {
                match client.fetch_heroes().await {
                    Ok(heroes) => Action::HeroesDidLoad(heroes),
                    Err(err) => {
                        log_fetch_failure("heroes", &err);
                        Action::HeroesDidError(err.to_string())
                    }
                }
            });
        }
        Effect::LoadReference => {
            ctx.tasks().spawn("reference", async move {
                match client.fetch_reference().await {
                    Ok(reference) => Action::ReferenceDidLoad(reference),
                    Err(err) => {
                        log_fetch_failure("reference", &err);
                        Action::ReferenceDidError(err.to_string())
                    }
                }
            });
        }
        Effect::ResolveHero { request_id, hero } => {
            ctx.tasks().spawn("hero_detail", async move {
                match client.fetch_reference().await {
                    Ok(reference) => Action::DetailDidLoad {
                        request_id,
                        detail: resolve::resolve(&hero, &reference),
                    },
                    Err(err) => {
                        tracing::debug!(request_id, hero = %hero.name, "hero detail failed");
                        log_fetch_failure("hero_detail", &err);
                        Action::DetailDidError {
                            request_id,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
    }
}
