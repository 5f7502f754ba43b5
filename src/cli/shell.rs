//! Interactive menu over a single loaded manager.
//!
//! The data file is written once, when the loop ends: on "Exit", at end of
//! input, or on Ctrl-C.

use crate::{
    cli::{ConsoleObserver, run::execute},
    prelude::{AppError, CustomerDataManager, command::Commands},
};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::signal;
use tracing::{debug, info};

type InputLines = Lines<BufReader<Stdin>>;

enum Input {
    Line(String),
    Eof,
    Interrupted,
}

enum Prompt<T> {
    Value(T),
    Back,
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum MenuChoice {
    Add,
    Edit,
    Show,
    List,
    Exit,
}

pub fn parse_menu_choice(action: &str) -> Result<MenuChoice, AppError> {
    match action.trim() {
        "1" => Ok(MenuChoice::Add),
        "2" => Ok(MenuChoice::Edit),
        "3" => Ok(MenuChoice::Show),
        "4" => Ok(MenuChoice::List),
        "5" => Ok(MenuChoice::Exit),
        other => Err(AppError::ParseCommand(other.to_string())),
    }
}

fn show_menu() {
    println!("\n");
    println!("1. Add Customer");
    println!("2. Edit Customer");
    println!("3. Show Customer");
    println!("4. List Customers");
    println!("5. Exit");
}

pub fn run_shell(mut manager: CustomerDataManager) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    manager.set_observer(Box::new(ConsoleObserver));

    let outcome = runtime.block_on(shell_loop(&mut manager));
    let flushed = manager.shutdown();

    // The stdin reader can still be parked on a blocking read
    runtime.shutdown_background();

    outcome.and(flushed)
}

async fn shell_loop(manager: &mut CustomerDataManager) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("\n\n--- Customer BOOK ---\n");

    'outerloop: loop {
        show_menu();

        let action = match read_input(&mut lines, "> ").await? {
            Input::Line(line) => line,
            Input::Eof => break 'outerloop,
            Input::Interrupted => {
                info!("interrupted, saving before exit");
                break 'outerloop;
            }
        };

        let choice = match parse_menu_choice(&action) {
            Ok(choice) => choice,
            Err(e) => {
                // User entered invalid command
                eprintln!("{}", e);
                continue 'outerloop;
            }
        };

        let prompted = match choice {
            MenuChoice::Exit => break 'outerloop,
            MenuChoice::List => Prompt::Value(Commands::List { reverse: false }),
            MenuChoice::Show => prompt_id(&mut lines)
                .await?
                .map(|id| Commands::Show { id }),
            MenuChoice::Add => prompt_add(&mut lines).await?,
            MenuChoice::Edit => prompt_edit(&mut lines).await?,
        };

        let command = match prompted {
            Prompt::Value(command) => command,
            Prompt::Back => continue 'outerloop,
            Prompt::Quit => break 'outerloop,
        };

        debug!(?command, "running shell command");
        if let Err(e) = execute(manager, command) {
            eprintln!("{}", e);
        }
    }

    println!("\nBye!");
    Ok(())
}

async fn read_input(lines: &mut InputLines, prompt: &str) -> Result<Input, AppError> {
    print!("{}", prompt);
    io::stdout().flush()?;

    tokio::select! {
        line = lines.next_line() => Ok(match line? {
            Some(line) => Input::Line(line.trim().to_string()),
            None => Input::Eof,
        }),
        _ = signal::ctrl_c() => Ok(Input::Interrupted),
    }
}

impl<T> Prompt<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Prompt<U> {
        match self {
            Prompt::Value(value) => Prompt::Value(f(value)),
            Prompt::Back => Prompt::Back,
            Prompt::Quit => Prompt::Quit,
        }
    }
}

async fn prompt_field(lines: &mut InputLines, label: &str) -> Result<Prompt<String>, AppError> {
    println!("\n{} \n* to go back: ", label);

    Ok(match read_input(lines, "> ").await? {
        Input::Line(line) if line == "*" => Prompt::Back,
        Input::Line(line) => Prompt::Value(line),
        Input::Eof | Input::Interrupted => Prompt::Quit,
    })
}

async fn prompt_id(lines: &mut InputLines) -> Result<Prompt<i32>, AppError> {
    match prompt_field(lines, "Enter customer ID").await? {
        Prompt::Value(raw) => match raw.parse::<i32>() {
            Ok(id) => Ok(Prompt::Value(id)),
            Err(e) => {
                eprintln!("{}", AppError::from(e));
                Ok(Prompt::Back)
            }
        },
        Prompt::Back => Ok(Prompt::Back),
        Prompt::Quit => Ok(Prompt::Quit),
    }
}

async fn prompt_fields(
    lines: &mut InputLines,
    labels: [&str; 4],
) -> Result<Prompt<[String; 4]>, AppError> {
    let mut values: [String; 4] = Default::default();

    for (slot, label) in values.iter_mut().zip(labels) {
        match prompt_field(lines, label).await? {
            Prompt::Value(value) => *slot = value,
            Prompt::Back => return Ok(Prompt::Back),
            Prompt::Quit => return Ok(Prompt::Quit),
        }
    }

    Ok(Prompt::Value(values))
}

async fn prompt_add(lines: &mut InputLines) -> Result<Prompt<Commands>, AppError> {
    let id = match prompt_id(lines).await? {
        Prompt::Value(id) => id,
        Prompt::Back => return Ok(Prompt::Back),
        Prompt::Quit => return Ok(Prompt::Quit),
    };

    let labels = [
        "Enter customer name",
        "Enter customer phone",
        "Enter customer email",
        "Enter customer postal code",
    ];

    Ok(prompt_fields(lines, labels)
        .await?
        .map(|[name, phone, email, postal_code]| Commands::Add {
            id,
            name,
            phone,
            email,
            postal_code,
        }))
}

async fn prompt_edit(lines: &mut InputLines) -> Result<Prompt<Commands>, AppError> {
    let id = match prompt_id(lines).await? {
        Prompt::Value(id) => id,
        Prompt::Back => return Ok(Prompt::Back),
        Prompt::Quit => return Ok(Prompt::Quit),
    };

    let labels = [
        "Enter new name (blank keeps current)",
        "Enter new phone (blank keeps current)",
        "Enter new email (blank keeps current)",
        "Enter new postal code (blank keeps current)",
    ];

    let keep_blank = |value: String| (!value.is_empty()).then_some(value);

    Ok(prompt_fields(lines, labels)
        .await?
        .map(|[name, phone, email, postal_code]| Commands::Edit {
            id,
            new_name: keep_blank(name),
            new_phone: keep_blank(phone),
            new_email: keep_blank(email),
            new_postal_code: keep_blank(postal_code),
        }))
}
