//! Command implementations over the engine and sync service.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use chrono::Local;
use comfy_table::Table;
use tatame_engine::Academy;
use tatame_model::{
    BeltColor, CheckInMethod, EntryType, NewFinancialRecord, NewStudent, PaymentStatus,
    StudentPatch, StudentStatus, User, UserRole, fresh_id,
};
use tatame_store::LocalStore;
use tatame_sync::{HttpDocumentHost, SyncService};

use crate::cli::{
    CheckinArgs, Cli, ExportArgs, FinanceAddArgs, FinanceCommand, FinanceListArgs, ImportArgs,
    LoginArgs, PromoteArgs, ResetArgs, RosterAddArgs, RosterCommand, SyncCommand,
};

/// Everything a command needs: the engine plus its sync service.
pub struct App {
    pub academy: Academy,
    pub sync: SyncService<HttpDocumentHost>,
}

impl App {
    /// Open the store, load the engine, and wire the sync service.
    pub fn open(cli: &Cli) -> anyhow::Result<Self> {
        let store = match &cli.data_dir {
            Some(dir) => LocalStore::open(dir),
            None => LocalStore::open_default(),
        };
        let academy = Academy::open(store.clone());
        let host = match &cli.endpoint {
            Some(endpoint) => HttpDocumentHost::new(endpoint)?,
            None => HttpDocumentHost::default_endpoint()?,
        };
        let sync = SyncService::new(host, store);
        Ok(Self { academy, sync })
    }

    /// Mirror a just-applied mutation to the remote document.
    ///
    /// One-shot commands exit before any debounce would elapse, so the
    /// pending change is flushed immediately; failures are best-effort,
    /// exactly like the background push.
    fn sync_after_mutation(&mut self) {
        if self.sync.sync_id().is_none() {
            return;
        }
        self.sync
            .note_change(self.academy.revision(), Instant::now());
        if let Err(error) = self.sync.flush(&self.academy) {
            tracing::warn!("could not mirror the change: {error}");
        }
    }

    /// Resolve a student by exact id or unique case-insensitive name
    /// prefix.
    fn resolve_student(&self, query: &str) -> anyhow::Result<String> {
        if let Some(student) = self.academy.student_by_id(query) {
            return Ok(student.id.clone());
        }
        let needle = query.to_lowercase();
        let matches: Vec<_> = self
            .academy
            .students()
            .iter()
            .filter(|s| s.name.to_lowercase().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [one] => Ok(one.id.clone()),
            [] => bail!("no student matches '{query}'"),
            many => bail!(
                "'{query}' is ambiguous: {}",
                many.iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

// ============================================================================
// Roster
// ============================================================================

pub fn run_roster(app: &mut App, command: RosterCommand) -> anyhow::Result<()> {
    match command {
        RosterCommand::List => {
            let mut table = Table::new();
            table.set_header(["Id", "Nome", "Faixa", "Graus", "Status", "Presenças"]);
            for student in app.academy.students() {
                table.add_row([
                    student.id.clone(),
                    student.name.clone(),
                    student.belt.to_string(),
                    student.stripes.to_string(),
                    student.status.to_string(),
                    student.attendance_count.to_string(),
                ]);
            }
            println!("{table}");
        }
        RosterCommand::Add(args) => {
            let belt: BeltColor = args.belt.parse().map_err(anyhow::Error::msg)?;
            if args.stripes > 4 {
                bail!("stripes must be between 0 and 4");
            }
            let today = Local::now().date_naive();
            let id = app.academy.add_student(NewStudent {
                name: args.name.clone(),
                birth_date: args.birth_date.unwrap_or(today),
                cpf: args.cpf,
                phone: args.phone,
                email: args.email,
                address: args.address,
                plan_id: args.plan,
                enrollment_date: args.enrollment_date.unwrap_or(today),
                status: StudentStatus::Active,
                photo_url: args.photo_url,
                belt,
                stripes: args.stripes,
            });
            app.sync_after_mutation();
            println!("enrolled {} ({id})", args.name);
        }
        RosterCommand::Promote(args) => run_promote(app, args)?,
        RosterCommand::Show { student } => {
            let id = app.resolve_student(&student)?;
            let student = app
                .academy
                .student_by_id(&id)
                .context("student disappeared")?;
            println!("{} - {} {} grau(s)", student.name, student.belt, student.stripes);
            println!("plano: {}  status: {}", student.plan_id, student.status);
            println!("presenças: {}", student.attendance_count);
            println!("histórico de graduação:");
            for event in &student.graduation_history {
                println!("  {}  {} {} grau(s)", event.date, event.belt, event.stripes);
            }
        }
    }
    Ok(())
}

fn run_promote(app: &mut App, args: PromoteArgs) -> anyhow::Result<()> {
    if args.stripes.is_some_and(|s| s > 4) {
        bail!("stripes must be between 0 and 4");
    }
    let id = app.resolve_student(&args.student)?;

    let patch = if args.belt.is_none() && args.stripes.is_none() {
        // natural progression: one more stripe, next belt after the 4th
        let student = app.academy.student_by_id(&id).context("student disappeared")?;
        if student.stripes < 4 {
            StudentPatch {
                stripes: Some(student.stripes + 1),
                ..Default::default()
            }
        } else {
            let next = student
                .belt
                .successor()
                .with_context(|| format!("{} já está na última faixa", student.name))?;
            StudentPatch {
                belt: Some(next),
                stripes: Some(0),
                ..Default::default()
            }
        }
    } else {
        let belt = args
            .belt
            .as_deref()
            .map(str::parse::<BeltColor>)
            .transpose()
            .map_err(anyhow::Error::msg)?;
        StudentPatch {
            belt,
            stripes: args.stripes,
            ..Default::default()
        }
    };
    if !app.academy.update_student(&id, patch).applied() {
        bail!("no student matches '{}'", args.student);
    }
    app.sync_after_mutation();

    let student = app.academy.student_by_id(&id).context("student disappeared")?;
    println!(
        "{} agora é faixa {} com {} grau(s)",
        student.name, student.belt, student.stripes
    );
    Ok(())
}

// ============================================================================
// Check-in
// ============================================================================

pub fn run_checkin(app: &mut App, args: CheckinArgs) -> anyhow::Result<()> {
    let id = app.resolve_student(&args.student)?;
    let method = if args.kiosk {
        CheckInMethod::Kiosk
    } else {
        CheckInMethod::Manual
    };
    if !app
        .academy
        .record_attendance(&id, args.class, method)
        .applied()
    {
        bail!("no student matches '{}'", args.student);
    }
    app.sync_after_mutation();

    let student = app.academy.student_by_id(&id).context("student disappeared")?;
    println!(
        "presença registrada: {} ({} aulas)",
        student.name, student.attendance_count
    );
    for alert in app.academy.notifications() {
        println!("  ⚠ {alert}");
    }
    Ok(())
}

/// Interactive self-service loop: student names come in on stdin while
/// the sync service ticks in between, so the debounced push and the
/// periodic pull run exactly as they would behind a kiosk screen.
pub fn run_kiosk(app: &mut App) -> anyhow::Result<()> {
    println!("modo totem - digite o nome do aluno (ou 'sair')");

    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        match receiver.try_recv() {
            Ok(line) => {
                let query = line.trim();
                if query.is_empty() {
                    continue;
                }
                if query.eq_ignore_ascii_case("sair") {
                    break;
                }
                match app.resolve_student(query) {
                    Ok(id) => {
                        let _ = app.academy.record_attendance(&id, None, CheckInMethod::Kiosk);
                        app.sync
                            .note_change(app.academy.revision(), Instant::now());
                        let student = app.academy.student_by_id(&id);
                        if let Some(student) = student {
                            println!("bom treino, {}!", student.name);
                        }
                    }
                    Err(error) => println!("{error}"),
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        app.sync.tick(&mut app.academy, Instant::now());
        std::thread::sleep(Duration::from_millis(200));
    }

    // whatever is still inside the debounce window goes out now
    if let Err(error) = app.sync.flush(&app.academy) {
        tracing::warn!("could not mirror pending check-ins: {error}");
    }
    Ok(())
}

// ============================================================================
// Finance
// ============================================================================

pub fn run_finance(app: &mut App, command: FinanceCommand) -> anyhow::Result<()> {
    match command {
        FinanceCommand::List(args) => run_finance_list(app, &args),
        FinanceCommand::Add(args) => {
            let entry_type: EntryType = args.kind.parse().map_err(anyhow::Error::msg)?;
            let status: PaymentStatus = args.status.parse().map_err(anyhow::Error::msg)?;
            if args.amount < 0.0 {
                bail!("amount must be non-negative");
            }
            let id = app.academy.add_financial(NewFinancialRecord {
                student_id: args.student,
                entry_type,
                category: args.category,
                amount: args.amount,
                date: args.date.unwrap_or_else(|| Local::now().date_naive()),
                status,
                description: args.description,
            });
            app.sync_after_mutation();
            println!("lançamento registrado ({id})");
            Ok(())
        }
        FinanceCommand::Remove { id } => {
            if !app.academy.delete_financial(&id).applied() {
                bail!("no ledger entry with id '{id}'");
            }
            app.sync_after_mutation();
            println!("lançamento removido");
            Ok(())
        }
    }
}

fn run_finance_list(app: &App, args: &FinanceListArgs) -> anyhow::Result<()> {
    let period = args
        .month
        .as_deref()
        .map(parse_month)
        .transpose()?;

    let mut table = Table::new();
    table.set_header(["Id", "Data", "Tipo", "Categoria", "Valor", "Status", "Descrição"]);
    for record in app.academy.financials() {
        table.add_row([
            record.id.clone(),
            record.date.to_string(),
            record.entry_type.to_string(),
            record.category.clone(),
            format!("{:.2}", record.amount),
            record.status.to_string(),
            record.description.clone(),
        ]);
    }
    println!("{table}");

    let summary = app.academy.finance_summary(period);
    println!(
        "recebido: R$ {:.2}   pago: R$ {:.2}   saldo: R$ {:.2}",
        summary.income,
        summary.expense,
        summary.balance()
    );
    Ok(())
}

fn parse_month(value: &str) -> anyhow::Result<(i32, u32)> {
    let (year, month) = value
        .split_once('-')
        .context("month must look like YYYY-MM")?;
    let year = year.parse().context("month must look like YYYY-MM")?;
    let month: u32 = month.parse().context("month must look like YYYY-MM")?;
    if !(1..=12).contains(&month) {
        bail!("month must be between 01 and 12");
    }
    Ok((year, month))
}

// ============================================================================
// Configuration listings and alerts
// ============================================================================

pub fn run_plans(app: &App) {
    let mut table = Table::new();
    table.set_header(["Id", "Plano", "Preço", "Meses"]);
    for plan in app.academy.plans() {
        table.add_row([
            plan.id.clone(),
            plan.name.clone(),
            format!("{:.2}", plan.price),
            plan.duration_months.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn run_products(app: &App) {
    let mut table = Table::new();
    table.set_header(["Id", "Produto", "Preço", "Categoria", "Estoque"]);
    for product in app.academy.products() {
        table.add_row([
            product.id.clone(),
            product.name.clone(),
            format!("{:.2}", product.price),
            product.category.clone(),
            product.stock.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn run_schedule(app: &App) {
    let mut table = Table::new();
    table.set_header(["Dia", "Hora", "Aula", "Professor"]);
    for slot in app.academy.schedules() {
        table.add_row([
            slot.day_of_week.clone(),
            slot.time.clone(),
            slot.class_name.clone(),
            slot.instructor.clone(),
        ]);
    }
    println!("{table}");
}

pub fn run_alerts(app: &App) {
    if app.academy.notifications().is_empty() {
        println!("nenhum aluno apto a graduação");
        return;
    }
    for alert in app.academy.notifications() {
        println!("⚠ {alert}");
    }
}

// ============================================================================
// Export / import / reset
// ============================================================================

pub fn run_export(app: &App, args: ExportArgs) -> anyhow::Result<()> {
    let document = app.academy.export_snapshot();
    match args.output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("exported to {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

pub fn run_import(app: &mut App, args: ImportArgs) -> anyhow::Result<()> {
    let document = std::fs::read_to_string(&args.path)
        .with_context(|| format!("could not read {}", args.path.display()))?;
    if !app.academy.import_snapshot(&document) {
        bail!("import rejected: the document does not parse");
    }
    app.sync_after_mutation();
    println!("import concluded: {} students", app.academy.students().len());
    Ok(())
}

pub fn run_reset(app: &mut App, args: &ResetArgs) -> anyhow::Result<()> {
    if !args.yes {
        print!(
            "ATENÇÃO: isso apagará TODOS os alunos, mensalidades e presenças permanentemente. \
             Continuar? [s/N] "
        );
        io::stdout().flush().ok();
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "s" | "sim") {
            println!("cancelado");
            return Ok(());
        }
    }
    app.academy.reset()?;
    println!("dados apagados");
    Ok(())
}

// ============================================================================
// Session
// ============================================================================

pub fn run_login(app: &mut App, args: LoginArgs) -> anyhow::Result<()> {
    let role: UserRole = args.role.parse().map_err(anyhow::Error::msg)?;
    app.academy.login(User {
        id: fresh_id(),
        name: args.name.clone(),
        role,
        email: args.email,
    });
    println!("bem-vindo, {}", args.name);
    Ok(())
}

pub fn run_logout(app: &mut App) {
    app.academy.logout();
    println!("sessão encerrada");
}

// ============================================================================
// Sync
// ============================================================================

pub fn run_sync(app: &mut App, command: SyncCommand) -> anyhow::Result<()> {
    match command {
        SyncCommand::Init => {
            if let Some(id) = app.sync.sync_id() {
                bail!("sync is already configured with document {id}");
            }
            let id = app.sync.provision(&app.academy)?;
            println!("sync document created: {id}");
            println!("use 'tatame sync adopt {id}' on the other device");
        }
        SyncCommand::Adopt { id } => {
            app.sync.adopt(&id, &mut app.academy)?;
            println!(
                "adopted {id}; pulled {} students",
                app.academy.students().len()
            );
        }
        SyncCommand::Status => {
            let status = app.sync.status();
            match status.sync_id {
                Some(id) => println!("document: {id}"),
                None => println!("sync is not configured (run 'tatame sync init')"),
            }
            println!("pending local changes: {}", status.dirty);
            match status.last_pull {
                Some(at) => println!("last pull: {at}"),
                None => println!("last pull: never (this run)"),
            }
            match status.last_push {
                Some(at) => println!("last push: {at}"),
                None => println!("last push: never (this run)"),
            }
        }
        SyncCommand::Pull => {
            app.sync.force_pull(&mut app.academy)?;
            println!("pulled; {} students local", app.academy.students().len());
        }
        SyncCommand::Watch => {
            if app.sync.sync_id().is_none() {
                bail!("sync is not configured (run 'tatame sync init')");
            }
            tracing::info!("watching for remote changes; Ctrl-C to stop");
            loop {
                app.sync.tick(&mut app.academy, Instant::now());
                std::thread::sleep(Duration::from_secs(1));
            }
        }
    }
    Ok(())
}
