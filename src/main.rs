//! SelectMore (Kommandozeile).
//!
//! Lädt einen Dokument-Snapshot, zeigt die Vorfilter-Kataloge und löst die
//! Zielmenge mit den konfigurierten Vorfiltern auf.

use select_more::app::PrefilterKind;
use select_more::{
    load_document, AppController, AppIntent, EngineOptions, EntityId, EventMarshal,
    FeedbackMessage, IntentHandler, MemoryHost, ScriptedPick, SelectionAction, Session,
};

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("SelectMore v{} startet...", env!("CARGO_PKG_VERSION"));

    let Some(path) = std::env::args().nth(1) else {
        anyhow::bail!("Aufruf: select-more <snapshot.json> [--sample=<id>] [Kategorie ...]");
    };
    let mut sample: Option<EntityId> = None;
    let mut categories: Vec<String> = Vec::new();
    for arg in std::env::args().skip(2) {
        match arg.strip_prefix("--sample=") {
            Some(id) => sample = Some(id.parse()?),
            None => categories.push(arg),
        }
    }

    // Optionen aus TOML laden (oder Standardwerte)
    let options = EngineOptions::load_from_file(&EngineOptions::config_path());
    let document = load_document(std::path::Path::new(&path))?;

    let mut session = Session::with_options(options);
    let mut host = MemoryHost::new(document);
    let mut controller = AppController::new();

    controller.handle_intent(&mut session, &mut host, AppIntent::DocumentChanged)?;
    print_catalogues(&session);

    if let Some(id) = sample {
        host.script_pick(ScriptedPick::Object(id));
        controller.handle_intent(&mut session, &mut host, AppIntent::TakeSampleRequested)?;
        println!("Filter:");
        for (_, label, value) in session.filter_rows() {
            println!("  {} = {}", label, value);
        }
    }

    if !categories.is_empty() {
        controller.handle_intent(
            &mut session,
            &mut host,
            AppIntent::PrefilterActivationChanged {
                kind: PrefilterKind::Category,
                active: true,
            },
        )?;
        for key in categories {
            controller.handle_intent(&mut session, &mut host, AppIntent::CategoryToggled { key })?;
        }
    }

    let mut marshal = EventMarshal::new(session.options.delivery_mode);
    let apply = marshal.create(IntentHandler::selection(SelectionAction::Apply));
    apply.raise();
    marshal.pump(&mut session, &mut host);
    apply.dispose();

    for message in session.feedback.drain() {
        match message {
            FeedbackMessage::SelectionCount(_) => println!("{}", message.text()),
            FeedbackMessage::Error(_) => eprintln!("Fehler: {}", message.text()),
        }
    }

    Ok(())
}

fn print_catalogues(session: &Session) {
    if let Some(categories) = session.category_filter() {
        println!("Kategorien:");
        for entry in categories.entries() {
            println!("  {} ({}) [{}]", entry.label, entry.count, entry.key);
        }
    }
    if let Some(levels) = session.level_filter() {
        println!("Geschosse:");
        for entry in levels.entries() {
            println!("  {} ({:.2})", entry.name, entry.elevation);
        }
    }
}
