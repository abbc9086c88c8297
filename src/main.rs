use landing_fx::command::{Command, HELP};
use landing_fx::contact_form::{FormState, SimulatedSubmitter, Submitter};
use landing_fx::error::SubmitError;
use landing_fx::{ConsentStore, FileConsentStore, MemoryConsentStore, Renderer, Site, SiteConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Pixels per wheel "line".
const LINE_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone)]
enum UserEvent {
    Command(Command),
    SubmitFinished(Result<(), SubmitError>),
}

struct App {
    config: SiteConfig,
    renderer: Option<Renderer>,
    site: Option<Site<StdRng>>,
    /// Moved into the site on first resume.
    consent_store: Option<Box<dyn ConsentStore>>,
    window: Option<Arc<Window>>,
    start_time: Instant,
    last_frame: Instant,
    runtime: Runtime,
    proxy: EventLoopProxy<UserEvent>,
    submitter: SimulatedSubmitter,
}

impl App {
    fn new(config: SiteConfig, runtime: Runtime, proxy: EventLoopProxy<UserEvent>) -> Self {
        let consent_store: Box<dyn ConsentStore> = match &config.consent_file {
            Some(path) => Box::new(FileConsentStore::new(path)),
            None => Box::new(MemoryConsentStore::default()),
        };
        let submitter = SimulatedSubmitter::new(config.submit_latency());

        Self {
            config,
            renderer: None,
            site: None,
            consent_store: Some(consent_store),
            window: None,
            start_time: Instant::now(),
            last_frame: Instant::now(),
            runtime,
            proxy,
            submitter,
        }
    }

    fn handle_command(&mut self, command: Command) {
        if command == Command::Submit {
            self.begin_submit();
            return;
        }
        let Some(site) = &mut self.site else {
            return;
        };

        match command {
            Command::ToggleMenu => site.toggle_menu(),
            Command::MenuLink => site.menu_link(),
            Command::Scroll(delta) => site.wheel(delta),
            Command::AcceptCookies => {
                if let Err(e) = site.accept_cookies() {
                    log::error!("failed to persist consent: {}", e);
                }
            }
            Command::Status => println!("{}", site.status_line()),
            Command::Help => println!("{}", HELP),
            field => {
                let Some(form) = site.form_mut() else {
                    println!("no contact form on this page");
                    return;
                };
                match field {
                    Command::Name(v) => form.set_name(&v),
                    Command::Phone(v) => {
                        form.set_phone(&v);
                        println!("phone: {}", form.form().phone);
                    }
                    Command::Email(v) => form.set_email(&v),
                    Command::Message(v) => form.set_message(&v),
                    Command::Captcha(v) => form.set_captcha(&v),
                    _ => {}
                }
            }
        }
    }

    fn begin_submit(&mut self) {
        let Some(form) = self.site.as_mut().and_then(|s| s.form_mut()) else {
            println!("no contact form on this page");
            return;
        };

        match form.begin_submit() {
            Ok(submission) => {
                println!("[{}]", form.button().label);
                let submitter = self.submitter;
                let proxy = self.proxy.clone();
                self.runtime.spawn(async move {
                    let result = submitter.send(&submission).await;
                    // Window may already be closed.
                    let _ = proxy.send_event(UserEvent::SubmitFinished(result));
                });
            }
            Err(e) => {
                log::debug!("submit rejected: {}", e);
                println!("{}", form.rejection_text(&e));
            }
        }
    }

    fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        let Some(form) = self.site.as_mut().and_then(|s| s.form_mut()) else {
            return;
        };

        if let Err(e) = form.finish_submit(result) {
            log::warn!("submission finished with error: {}", e);
        }
        if let Some(message) = form.message() {
            println!("{}", message.text);
        }
        if form.state() == FormState::Succeeded {
            println!("{}", form.challenge_prompt());
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let now_ms = now.duration_since(self.start_time).as_secs_f64() * 1000.0;

        if let Some(site) = &mut self.site {
            let banner_was_visible = site.cookie_banner_visible();
            site.tick(dt, now_ms);
            if !banner_was_visible && site.cookie_banner_visible() {
                println!("🍪 This site uses cookies. Type 'accept' to agree.");
            }
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(site)) = (&mut self.renderer, &mut self.site) else {
            return;
        };
        let Some((field, camera)) = site.field_and_camera() else {
            return;
        };

        match renderer.render(field, camera) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Command(command) => self.handle_command(command),
            UserEvent::SubmitFinished(result) => self.finish_submit(result),
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());
        self.window = Some(window.clone());

        let size = window.inner_size();
        let store = self
            .consent_store
            .take()
            .unwrap_or_else(|| Box::new(MemoryConsentStore::default()));
        let mut site = Site::new(&self.config, store, StdRng::from_entropy());
        site.resize(size.width, size.height);

        // No hero mount point: nothing to draw, controllers still run.
        if let Some(field) = site.field() {
            self.renderer = Some(pollster::block_on(Renderer::new(
                window.clone(),
                field,
                self.config.background,
            )));
        }

        if let Some(form) = site.form() {
            println!("{}", form.challenge_prompt());
        }
        self.site = Some(site);
        self.start_time = Instant::now();
        self.last_frame = self.start_time;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                if let Some(site) = &mut self.site {
                    site.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(site) = &mut self.site {
                    site.pointer_moved(position.x as f32, position.y as f32);
                }
            }

            WindowEvent::MouseWheel { delta, phase, .. } => {
                if let Some(site) = &mut self.site {
                    match delta {
                        MouseScrollDelta::LineDelta(_, y) => site.wheel(-y * LINE_HEIGHT),
                        // Trackpads report pixel deltas with touch phases.
                        MouseScrollDelta::PixelDelta(p) if phase == TouchPhase::Moved => {
                            site.touch(-p.y as f32 / 2.0)
                        }
                        MouseScrollDelta::PixelDelta(p) => site.wheel(-p.y as f32),
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match SiteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n✨ {}", config.title);
    println!("   Type commands below ('help' for the list), ESC in the window to quit.\n");

    let event_loop = EventLoop::<UserEvent>::with_user_event().build().unwrap();
    let proxy = event_loop.create_proxy();
    event_loop.set_control_flow(ControlFlow::Poll);

    let input_proxy = proxy.clone();
    thread::spawn(move || {
        input_loop(input_proxy);
    });

    let mut app = App::new(config, runtime, proxy);
    event_loop.run_app(&mut app).unwrap();
}

/// Background thread that reads commands and forwards them to the event loop
fn input_loop(proxy: EventLoopProxy<UserEvent>) {
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        if input.trim().is_empty() {
            continue;
        }

        match Command::parse(&input) {
            Ok(command) => {
                if proxy.send_event(UserEvent::Command(command)).is_err() {
                    break; // Window closed
                }
            }
            Err(e) => eprintln!("❌ {}", e),
        }
    }
}
