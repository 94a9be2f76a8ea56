mod error;
mod event;
mod job_schedulers;
mod reminder;
mod shared;
mod status;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use calendar_infra::CalendarContext;
use job_schedulers::ReminderJobScheduler;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub use error::CalendarError;
pub use reminder::send_due_reminders::{
    DispatchOutcome, SendDueRemindersUseCase, SkipReason, TickReport,
};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    reminder_job: ReminderJobScheduler,
}

impl Application {
    pub async fn new(context: CalendarContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let mut reminder_job = ReminderJobScheduler::new(context);
        reminder_job.start();

        Ok(Self {
            server,
            port,
            reminder_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: CalendarContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Serves requests until the server shuts down, then stops the
    /// reminder job
    pub async fn start(mut self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.reminder_job.stop().await;
        res
    }
}
