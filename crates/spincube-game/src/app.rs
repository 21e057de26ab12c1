//! The engine `App` driving the demo.

use std::cell::Cell;
use std::rc::Rc;

use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::core::{App, AppControl, FrameCtx};
use spincube_engine::input::{InputFrame, InputState};
use spincube_engine::paint::Color;
use spincube_engine::render::{MeshRenderer, RectRenderer, TextRenderer};
use spincube_engine::text::{FontId, FontSystem};
use spincube_engine::world::{GeometryError, TextureId};
use spincube_ui::prelude::UiInput;
use spincube_ui::scene::UiScene;

use crate::config::GameConfig;
use crate::controls::{key_commands, CommandQueue, MovementFlags};
use crate::host::SceneHost;
use crate::render_loop::update_frame;
use crate::shell::AppShell;
use crate::texture_fetch::TextureFetch;
use crate::ui::build_ui;

pub struct SpincubeApp {
    config: GameConfig,
    shell: AppShell,
    host: SceneHost,
    flags: MovementFlags,
    queue: CommandQueue,
    start_requested: Rc<Cell<bool>>,

    ui: UiScene,
    font: Option<FontId>,

    cube_texture: Option<TextureId>,
    texture_fetch: Option<TextureFetch>,

    mesh_renderer: MeshRenderer,
    rect_renderer: RectRenderer,
    text_renderer: TextRenderer,
}

impl SpincubeApp {
    pub fn new(config: GameConfig) -> Self {
        let mut fonts = FontSystem::new();
        let font = match fonts.load_first(&config.font_paths) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("no UI font available, labels are hidden: {e}");
                None
            }
        };

        let aspect = (config.window.width / config.window.height) as f32;
        Self {
            shell: AppShell::new(),
            host: SceneHost::new(aspect),
            flags: MovementFlags::default(),
            queue: CommandQueue::new(),
            start_requested: Rc::new(Cell::new(false)),
            ui: UiScene::with_fonts(fonts),
            font,
            cube_texture: None,
            texture_fetch: None,
            mesh_renderer: MeshRenderer::new(),
            rect_renderer: RectRenderer::new(),
            text_renderer: TextRenderer::new(),
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.shell.is_running()
    }

    pub fn host(&self) -> &SceneHost {
        &self.host
    }

    pub fn ui(&self) -> &UiScene {
        &self.ui
    }

    /// Builds the initial scene and starts the texture download.
    pub fn init_scene(&mut self) -> Result<(), GeometryError> {
        self.cube_texture = Some(self.host.build_initial_scene()?);

        match TextureFetch::spawn(self.config.texture_url.clone()) {
            Ok(fetch) => self.texture_fetch = Some(fetch),
            Err(e) => log::warn!("could not start texture download: {e}"),
        }
        Ok(())
    }

    /// Advances one frame without touching the GPU.
    ///
    /// Order: texture arrival, start request, queued commands and movement,
    /// spin, then UI layout and event dispatch. Commands emitted by the UI
    /// are drained on the next call. Returns the scene rect.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, viewport: Vec2, elapsed_secs: f32) -> Rect {
        self.poll_texture();
        self.apply_start_request();

        if self.shell.is_running() {
            for command in key_commands(frame) {
                self.queue.push(command);
            }
        }
        update_frame(&mut self.host, &mut self.flags, &self.queue, elapsed_secs);

        let surface = self.shell.surface_rect(viewport);
        self.host.camera.set_viewport_size(surface.size.x, surface.size.y);

        let root = build_ui(self.shell.is_running(), surface, self.font, &self.queue, &self.start_requested);
        let _ = self.ui.frame(root, viewport, &UiInput::from_engine(input, frame));

        surface
    }

    fn poll_texture(&mut self) {
        let (Some(fetch), Some(slot)) = (self.texture_fetch.as_ref(), self.cube_texture) else { return };
        let Some(result) = fetch.poll() else { return };

        match result {
            Ok(image) => {
                log::info!("texture loaded from {} ({}x{})", fetch.url(), image.width, image.height);
                self.host.set_texture(slot, image);
            }
            Err(e) => log::warn!("texture {} unavailable, keeping white: {e}", fetch.url()),
        }
        self.texture_fetch = None;
    }

    fn apply_start_request(&mut self) {
        if self.start_requested.replace(false) && self.shell.start() {
            log::info!("running started");
            self.host.set_running(true);
        }
    }
}

impl App for SpincubeApp {
    fn on_start(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Err(e) = self.init_scene() {
            log::error!("failed to build the initial scene: {e}");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let surface = self.update(ctx.input, ctx.input_frame, Vec2::new(w, h), ctx.time.elapsed);

        let host = &self.host;
        let mesh = &mut self.mesh_renderer;
        let rects = &mut self.rect_renderer;
        let texts = &mut self.text_renderer;
        let dl = &mut self.ui.draw_list;
        let fs = &self.ui.font_system;

        ctx.render(Color::from_hex(self.config.clear_color), |rctx, target| {
            let (sw, sh) = rctx.surface_size;
            if let Some(area) = surface.to_physical(rctx.scale_factor, sw, sh) {
                mesh.render(rctx, target, &host.scene, &host.camera, area);
            }
            rects.render(rctx, target, dl);
            texts.render(rctx, target, dl, fs);
        })
    }
}
