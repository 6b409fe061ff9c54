use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Theme, Window, WindowId},
};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, SyncSender},
    thread,
};

use anyhow::Context as _;
use log::{error, info, warn};

use crate::{
    data::{Command, Program},
    game::{state::TITLE, Direction},
};

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    pub prog: Program,
    pub window: Option<&'static Window>,
    pub surface: Option<WindowSurface>,
    pub exit_sender: Option<SyncSender<()>>,
    pub final_buffer_size: PhysicalSize<u32>,
    pub error: Option<anyhow::Error>,
}

/// Maps a pressed key to a game command.
pub fn key_to_command(key: Key<&str>) -> Command {
    match key {
        Key::Named(NamedKey::Escape) => Command::Close,

        Key::Named(NamedKey::ArrowLeft) => Command::Steer(Direction::Left),
        Key::Named(NamedKey::ArrowRight) => Command::Steer(Direction::Right),
        Key::Named(NamedKey::ArrowUp) => Command::Steer(Direction::Up),
        Key::Named(NamedKey::ArrowDown) => Command::Steer(Direction::Down),

        Key::Character("r") | Key::Character("R") => Command::Restart,

        _ => Command::Blank,
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so a second
        // resume must not create another one.
        if self.window.is_some() {
            warn!("Resumed again, keeping the existing window.");
            return;
        }

        if let Err(err) = self.init_window(event_loop) {
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(_) => {
                if let Some(w) = self.window.as_ref() {
                    w.request_redraw()
                }
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    warn!("Snek is unable to resize the buffer!");
                    return;
                };

                if width == 0 || height == 0 {
                    return;
                }

                self.final_buffer_size = PhysicalSize::new(width, height);

                if let Err(err) = Self::resize_surface(surface, width, height) {
                    error!("{:#}", err);
                    return;
                }

                self.prog.force_render();
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let cmd = key_to_command(event.logical_key.as_ref());

                if cmd.is_close_requested() {
                    event_loop.exit();
                    return;
                }

                if self.prog.eval_command(&cmd) {
                    self.push_title();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window else {
                    return;
                };

                self.prog.update();
                self.push_title();

                self.prog.render();

                let Some(Ok(mut buffer)) = self.surface.as_mut().map(|s| s.buffer_mut()) else {
                    return;
                };

                self.prog.pix.scale_to(
                    self.prog.scale() as usize,
                    &mut buffer,
                    Some(self.final_buffer_size.width as usize),
                );

                window.pre_present_notify();
                if let Err(e) = buffer.present() {
                    error!("Snek is failing to present buffers to the window: {e}.");
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(
            self.prog.pix.width() as u32 * scale,
            self.prog.pix.height() as u32 * scale,
        );

        let window_attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(win_size)
            .with_resizable(self.prog.is_resizable())
            .with_theme(Some(Theme::Light));

        let window: &'static Window = Box::leak(Box::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        ));

        self.window = Some(window);

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window)
            .map_err(|e| anyhow::anyhow!("Failed to create graphics context: {e}"))?;
        let mut surface = Surface::new(&context, window)
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {e}"))?;

        Self::resize_surface(&mut surface, size.width, size.height)?;

        self.surface = Some(surface);

        if !self.prog.is_resizable() {
            window.set_min_inner_size(Some(win_size));
            window.set_max_inner_size(Some(win_size));
        }

        let (exit_send, exit_recv) = mpsc::sync_channel(1);

        self.exit_sender = Some(exit_send);

        let interval = self.prog.get_rr_interval();

        info!("Window opened at {}x{}", size.width, size.height);

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".to_owned())
            .spawn(move || loop {
                if exit_recv.recv_timeout(interval).is_ok() {
                    break;
                }

                if !window.is_minimized().unwrap_or(false) {
                    window.request_redraw();
                }
            })
            .context("Failed to spawn the redraw thread")?;

        Ok(())
    }

    fn push_title(&mut self) {
        if let (Some(window), Some(title)) = (self.window, self.prog.take_title()) {
            window.set_title(&title);
        }
    }

    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> anyhow::Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            anyhow::bail!("Surface size is zero");
        };

        surface
            .resize(w, h)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface buffer: {e}"))
    }
}

pub fn winit_main(prog: Program) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create the event loop")?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut state).context("Event loop failed")?;

    if let Some(sender) = state.exit_sender.as_ref() {
        let _ = sender.send(());
    }

    match state.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
