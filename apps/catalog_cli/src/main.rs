use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    drive, load_settings, CatalogScreen, HttpCatalogService, Notification,
    RecordingNotifications, RemoteCatalogService, ScreenEvent,
};
use shared::{
    domain::{Departamento, DepartamentoId},
    protocol::messages,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog_cli", about = "Catálogo Departamento")]
struct Args {
    /// Base URL of the catalog service, e.g. http://127.0.0.1:3000/api
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every departamento.
    List,
    /// List departamentos whose id or nombre contains QUERY.
    Search { query: String },
    Create {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        descripcion: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        descripcion: Option<String>,
    },
    Delete {
        id: i64,
        /// Answer the confirmation prompt with "Sí".
        #[arg(long)]
        yes: bool,
    },
}

type Screen = CatalogScreen<RecordingNotifications>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = HttpCatalogService::from_settings(&settings)
        .with_context(|| format!("invalid catalog service url '{}'", settings.api_base_url))?;
    tracing::debug!(base_url = %service.base_url(), "catalog service ready");

    let (mut screen, initial) = CatalogScreen::mount(RecordingNotifications::new());
    drive(&mut screen, &service, initial).await;
    let outcome = run_command(&mut screen, &service, args.command).await;

    print_notifications(screen.notifier_mut().drain());
    println!("{}", render_table(screen.visible_records()));
    outcome
}

async fn run_command(
    screen: &mut Screen,
    service: &dyn RemoteCatalogService,
    command: Command,
) -> Result<()> {
    match command {
        Command::List => Ok(()),
        Command::Search { query } => screen
            .handle(ScreenEvent::Search(query))
            .map(drop)
            .map_err(anyhow::Error::from),
        Command::Create {
            nombre,
            descripcion,
        } => {
            screen.handle(ScreenEvent::OpenCreate)?;
            submit_form(screen, service, Some(nombre), descripcion).await
        }
        Command::Update {
            id,
            nombre,
            descripcion,
        } => {
            let record = find_record(screen, DepartamentoId(id))?;
            screen.handle(ScreenEvent::OpenEdit(record))?;
            submit_form(screen, service, nombre, descripcion).await
        }
        Command::Delete { id, yes } => {
            let record = find_record(screen, DepartamentoId(id))?;
            delete_record(screen, service, record, yes).await
        }
    }
}

async fn submit_form(
    screen: &mut Screen,
    service: &dyn RemoteCatalogService,
    nombre: Option<String>,
    descripcion: Option<String>,
) -> Result<()> {
    let form = screen
        .form_mut()
        .ok_or_else(|| anyhow!("record form is not open"))?;
    if let Some(nombre) = nombre {
        form.nombre = nombre;
    }
    if let Some(descripcion) = descripcion {
        form.descripcion = descripcion;
    }

    let requests = screen.handle(ScreenEvent::SubmitForm)?;
    drive(screen, service, requests).await;

    if screen.modal_open() {
        bail!("the catalog service rejected the record");
    }
    Ok(())
}

async fn delete_record(
    screen: &mut Screen,
    service: &dyn RemoteCatalogService,
    record: Departamento,
    confirmed: bool,
) -> Result<()> {
    screen.handle(ScreenEvent::RequestDelete(record.clone()))?;
    let (_, actions) = screen
        .notifier()
        .open_prompts()
        .last()
        .copied()
        .ok_or_else(|| anyhow!("no confirmation prompt was shown"))?;
    let answer = if confirmed {
        actions.confirm.clone()
    } else {
        actions.cancel.clone()
    };

    let requests = screen.handle(answer)?;
    drive(screen, service, requests).await;

    if !confirmed {
        eprintln!("Eliminación cancelada; repite con --yes para confirmar.");
        return Ok(());
    }
    // A failed follow-up refresh keeps the old list on screen.
    if screen.notifier().errors().contains(&messages::DELETE_FAILED) {
        bail!("departamento {} was not deleted", record.id);
    }
    Ok(())
}

fn find_record(screen: &Screen, id: DepartamentoId) -> Result<Departamento> {
    screen
        .all_records()
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("departamento {id} no encontrado"))
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        match notification {
            Notification::Success(message) => eprintln!("✔ {message}"),
            Notification::Error(message) => eprintln!("✖ {message}"),
            Notification::Prompt { message, .. } => eprintln!("? {message} [Sí/No]"),
            Notification::Dismissed(_) => {}
        }
    }
}

fn render_table(records: &[Departamento]) -> String {
    let headers = ["ID", "Nombre", "Descripcion"];
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.nombre.clone(),
                r.descripcion_or_empty().to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers)];
    out.extend(rows.iter().map(|[id, nombre, descripcion]| {
        line([id.as_str(), nombre.as_str(), descripcion.as_str()])
    }));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use client_core::RemoteError;
    use shared::domain::DepartamentoPayload;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct FakeCatalog {
        records: Mutex<Vec<Departamento>>,
        calls: Mutex<Vec<&'static str>>,
        fail_lists: AtomicBool,
        fail_deletes: bool,
    }

    impl FakeCatalog {
        fn seeded(records: Vec<Departamento>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Self::default()
            }
        }

        async fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl RemoteCatalogService for FakeCatalog {
        async fn list(&self) -> Result<Vec<Departamento>, RemoteError> {
            self.calls.lock().await.push("list");
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(RemoteError::status(500, "db down"));
            }
            Ok(self.records.lock().await.clone())
        }

        async fn create(&self, payload: &DepartamentoPayload) -> Result<Departamento, RemoteError> {
            self.calls.lock().await.push("create");
            let mut records = self.records.lock().await;
            let next = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
            let record = payload.clone().into_record(DepartamentoId(next));
            records.push(record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            id: DepartamentoId,
            payload: &DepartamentoPayload,
        ) -> Result<Departamento, RemoteError> {
            self.calls.lock().await.push("update");
            let mut records = self.records.lock().await;
            let Some(slot) = records.iter_mut().find(|r| r.id == id) else {
                return Err(RemoteError::status(404, "not found"));
            };
            *slot = payload.clone().into_record(id);
            Ok(slot.clone())
        }

        async fn delete(&self, id: DepartamentoId) -> Result<(), RemoteError> {
            self.calls.lock().await.push("delete");
            if self.fail_deletes {
                return Err(RemoteError::status(500, "boom"));
            }
            self.records.lock().await.retain(|r| r.id != id);
            Ok(())
        }
    }

    fn legal() -> Departamento {
        Departamento {
            id: DepartamentoId(5),
            nombre: "Legal".into(),
            descripcion: Some("Contratos".into()),
        }
    }

    async fn mounted(service: &FakeCatalog) -> Screen {
        let (mut screen, initial) = CatalogScreen::mount(RecordingNotifications::new());
        drive(&mut screen, service, initial).await;
        screen
    }

    #[tokio::test]
    async fn create_command_adds_record_and_refreshes() {
        let service = FakeCatalog::default();
        let mut screen = mounted(&service).await;
        let command = Command::Create {
            nombre: "RH".into(),
            descripcion: None,
        };

        run_command(&mut screen, &service, command)
            .await
            .expect("create");

        assert_eq!(screen.all_records().len(), 1);
        assert_eq!(screen.all_records()[0].nombre, "RH");
        assert_eq!(screen.all_records()[0].descripcion.as_deref(), Some(""));
        assert_eq!(screen.notifier().successes(), vec![messages::RECORD_CREATED]);
        assert_eq!(service.calls().await, vec!["list", "create", "list"]);
    }

    #[tokio::test]
    async fn create_command_with_blank_nombre_fails_without_request() {
        let service = FakeCatalog::default();
        let mut screen = mounted(&service).await;
        let command = Command::Create {
            nombre: "   ".into(),
            descripcion: None,
        };

        assert!(run_command(&mut screen, &service, command).await.is_err());
        assert_eq!(service.calls().await, vec!["list"]);
    }

    #[tokio::test]
    async fn update_command_keeps_fields_not_given() {
        let service = FakeCatalog::seeded(vec![legal()]);
        let mut screen = mounted(&service).await;
        let command = Command::Update {
            id: 5,
            nombre: None,
            descripcion: Some("Litigios".into()),
        };

        run_command(&mut screen, &service, command)
            .await
            .expect("update");

        assert_eq!(screen.all_records()[0].nombre, "Legal");
        assert_eq!(
            screen.all_records()[0].descripcion.as_deref(),
            Some("Litigios")
        );
        assert_eq!(service.calls().await, vec!["list", "update", "list"]);
    }

    #[tokio::test]
    async fn update_command_for_unknown_id_fails() {
        let service = FakeCatalog::seeded(vec![legal()]);
        let mut screen = mounted(&service).await;
        let command = Command::Update {
            id: 9,
            nombre: Some("Otro".into()),
            descripcion: None,
        };

        assert!(run_command(&mut screen, &service, command).await.is_err());
        assert_eq!(service.calls().await, vec!["list"]);
    }

    #[tokio::test]
    async fn confirmed_delete_succeeds_even_if_refresh_fails() {
        let service = FakeCatalog::seeded(vec![legal()]);
        let mut screen = mounted(&service).await;
        service.fail_lists.store(true, Ordering::SeqCst);

        run_command(&mut screen, &service, Command::Delete { id: 5, yes: true })
            .await
            .expect("delete");

        assert_eq!(screen.notifier().successes(), vec![messages::RECORD_DELETED]);
        assert!(screen.notifier().errors().is_empty());
        assert_eq!(service.calls().await, vec!["list", "delete", "list"]);
    }

    #[tokio::test]
    async fn rejected_delete_is_an_error() {
        let service = FakeCatalog {
            fail_deletes: true,
            ..FakeCatalog::seeded(vec![legal()])
        };
        let mut screen = mounted(&service).await;

        let err = run_command(&mut screen, &service, Command::Delete { id: 5, yes: true })
            .await
            .expect_err("delete should fail");
        assert_eq!(err.to_string(), "departamento 5 was not deleted");
        assert_eq!(screen.notifier().errors(), vec![messages::DELETE_FAILED]);
        assert_eq!(screen.all_records(), &[legal()]);
    }

    #[tokio::test]
    async fn unconfirmed_delete_never_calls_the_service() {
        let service = FakeCatalog::seeded(vec![legal()]);
        let mut screen = mounted(&service).await;

        run_command(&mut screen, &service, Command::Delete { id: 5, yes: false })
            .await
            .expect("cancelled");

        assert_eq!(screen.all_records(), &[legal()]);
        assert_eq!(service.calls().await, vec!["list"]);
    }

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let records = vec![
            Departamento {
                id: DepartamentoId(1),
                nombre: "Ventas".into(),
                descripcion: Some("Área comercial".into()),
            },
            Departamento {
                id: DepartamentoId(12),
                nombre: "RH".into(),
                descripcion: None,
            },
        ];
        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID  Nombre  Descripcion");
        assert_eq!(lines[1], "1   Ventas  Área comercial");
        assert_eq!(lines[2], "12  RH");
    }

    #[test]
    fn empty_table_has_only_headers() {
        assert_eq!(render_table(&[]), "ID  Nombre  Descripcion");
    }

    #[test]
    fn parses_update_with_optional_fields() {
        let args = Args::try_parse_from([
            "catalog_cli",
            "--api-url",
            "http://localhost:9000/api",
            "update",
            "3",
            "--descripcion",
            "Nueva",
        ])
        .expect("args");
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000/api"));
        match args.command {
            Command::Update {
                id,
                nombre,
                descripcion,
            } => {
                assert_eq!(id, 3);
                assert_eq!(nombre, None);
                assert_eq!(descripcion.as_deref(), Some("Nueva"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
