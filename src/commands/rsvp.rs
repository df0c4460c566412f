use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use owo_colors::OwoColorize;
use wedding_core::calendar::google_calendar_url;
use wedding_core::rsvp::{
    Attendance, Drink, DrinkSet, FieldEdit, Meal, RsvpForm, ScriptEndpoint, SubmitError,
    SubmitOutcome, ValidationError,
};
use wedding_core::{SiteConfig, WeddingEvent};

use crate::render::Render;
use crate::utils::tui;

pub async fn run(site: SiteConfig, page_slug: &str) -> Result<()> {
    let page = site.page(page_slug)?;
    let events = site.page_events(page)?;

    println!("{}", page.heading.bold());
    println!("{}", page.tagline.dimmed());
    for event in &events {
        println!();
        println!("{}", event.render());
    }
    println!();

    let form = RsvpForm::new(page.fields);
    let endpoint = ScriptEndpoint::new(page.endpoint.clone());

    prompt_name(&form)?;
    if form.fields().phone {
        prompt_phone(&form)?;
    }
    prompt_attendance(&form)?;
    if form.submission().is_attending() {
        prompt_dependent(&form)?;
    }
    if form.fields().notes {
        let notes: String = Input::new()
            .with_prompt("  Any special notes? (skip)")
            .allow_empty(true)
            .interact_text()?;
        form.edit(FieldEdit::Notes(notes))?;
    }

    loop {
        let spinner = tui::create_spinner("  Sending your RSVP");
        let result = form.submit(&endpoint).await;
        spinner.finish_and_clear();

        match result {
            Ok(SubmitOutcome::Submitted(confirmation)) => {
                println!();
                println!("{}", confirmation.confetti.render());
                println!("{}", "  Thank You!".green().bold());
                if confirmation.attending {
                    println!("  We have received your RSVP and look forward to celebrating with you.");
                    offer_calendar(&site, &events)?;
                } else {
                    println!("  We have received your RSVP. You will be missed!");
                }
                return Ok(());
            }
            Ok(SubmitOutcome::Ignored(phase)) => {
                tracing::warn!(?phase, "submit ignored");
                return Ok(());
            }
            Err(SubmitError::Invalid(e)) => {
                eprintln!("  {}", e.to_string().red());
                reprompt(&form, e)?;
            }
            Err(e @ SubmitError::Transport(_)) => {
                eprintln!("  {}", e.to_string().red());
                let retry = Confirm::new()
                    .with_prompt("  Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    anyhow::bail!("RSVP was not sent");
                }
            }
        }
    }
}

fn prompt_name(form: &RsvpForm) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("  Your Name")
        .allow_empty(true)
        .interact_text()?;
    form.edit(FieldEdit::Name(name))?;
    Ok(())
}

fn prompt_phone(form: &RsvpForm) -> Result<()> {
    let phone: String = Input::new()
        .with_prompt("  Phone Number")
        .allow_empty(true)
        .interact_text()?;
    form.edit(FieldEdit::Phone(phone))?;
    Ok(())
}

fn prompt_attendance(form: &RsvpForm) -> Result<()> {
    let items: Vec<&str> = Attendance::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("  Will you attend?")
        .items(&items)
        .default(0)
        .interact()?;
    form.edit(FieldEdit::Attendance(Some(Attendance::ALL[selection])))?;
    Ok(())
}

/// Guests, meal and drinks, asked only after accepting
fn prompt_dependent(form: &RsvpForm) -> Result<()> {
    let fields = *form.fields();

    if fields.guests {
        prompt_guests(form, fields.max_guests)?;
    }
    if fields.meal {
        prompt_meal(form)?;
    }
    if fields.drinks {
        prompt_drinks(form)?;
    }

    Ok(())
}

/// Retry until the count is accepted by the form.
fn prompt_guests(form: &RsvpForm, max: u8) -> Result<()> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  How many guests, including yourself? (1-{})", max))
            .allow_empty(true)
            .interact_text()?;
        match form.edit(FieldEdit::Guests(input)) {
            Ok(()) => return Ok(()),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_meal(form: &RsvpForm) -> Result<()> {
    let items: Vec<&str> = Meal::ALL.iter().map(|m| m.label()).collect();
    let selection = Select::new()
        .with_prompt("  Meal preference")
        .items(&items)
        .default(0)
        .interact()?;
    form.edit(FieldEdit::Meal(Some(Meal::ALL[selection])))?;
    Ok(())
}

fn prompt_drinks(form: &RsvpForm) -> Result<()> {
    let items: Vec<&str> = Drink::ALL.iter().map(|d| d.label()).collect();
    let selections = MultiSelect::new()
        .with_prompt("  Drink preferences (space to toggle, enter to confirm)")
        .items(&items)
        .interact()?;
    let drinks = DrinkSet::from_selection(selections.into_iter().map(|i| Drink::ALL[i]));
    form.edit(FieldEdit::Drinks(drinks))?;
    Ok(())
}

/// Ask again for the field the validation stopped at.
fn reprompt(form: &RsvpForm, error: ValidationError) -> Result<()> {
    match error {
        ValidationError::MissingName => prompt_name(form),
        ValidationError::MissingPhone => prompt_phone(form),
        ValidationError::MissingAttendance => prompt_attendance(form),
        ValidationError::MissingMeal => prompt_meal(form),
        ValidationError::MissingDrinks => prompt_drinks(form),
    }
}

fn offer_calendar(site: &SiteConfig, events: &[&WeddingEvent]) -> Result<()> {
    let links: Vec<_> = events
        .iter()
        .map(|event| google_calendar_url(event, site.timezone).map(|url| (event.title.as_str(), url)))
        .collect::<Result<_, _>>()?;

    println!();
    for (title, url) in &links {
        println!("  {} {}", title.bold(), url.as_str().dimmed());
    }

    let open_now = Confirm::new()
        .with_prompt("  Add to Google Calendar now?")
        .default(false)
        .interact()?;
    if open_now {
        for (_, url) in &links {
            open::that(url.as_str())?;
        }
    }

    Ok(())
}
