//! Interactive numbered menu over the record and profile services.

mod parse;
mod prompt;

use std::io::Write;
use std::sync::Arc;

use collabgraph_core::research::{
    CreateProjectRequest, CreatePublicationRequest, CreateResearcherRequest, PopulatedResearcher,
    Publication,
};

use crate::services::{ProfileAssembler, RecordService};
use crate::state::AppState;

use parse::{
    is_yes, parse_count, parse_interests, parse_menu_choice, parse_selection, parse_year,
    MenuChoice,
};
pub use prompt::{Prompt, TerminalPrompt};

const MENU: &str = "\n===== Research Collaboration CLI =====
1. Add Researcher
2. Add Project
3. Add Publication
4. Show Researchers
5. Show Projects
6. Show Collaborations
7. Show Researcher Profile
0. Exit";

/// The menu loop. Questions go through `P`, listings are written to `W`.
pub struct Shell<P, W> {
    records: Arc<RecordService>,
    profiles: Arc<ProfileAssembler>,
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> Shell<P, W> {
    pub fn new(state: &AppState, prompt: P, out: W) -> Self {
        Self {
            records: state.records.clone(),
            profiles: state.profiles.clone(),
            prompt,
            out,
        }
    }

    /// Runs until the user picks 0.
    ///
    /// A failing action is reported and the menu continues; only prompt and
    /// output errors end the loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let answer = self.prompt.ask("Enter your choice (number)")?;

            let Some(choice) = parse_menu_choice(&answer) else {
                writeln!(self.out, "Invalid choice. Try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                writeln!(self.out, "Exiting CLI...")?;
                return Ok(());
            }

            if let Err(err) = self.dispatch(choice).await {
                tracing::error!(?choice, error = %err, "Menu action failed");
                writeln!(self.out, "Error: {err}")?;
            }
        }
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> anyhow::Result<()> {
        match choice {
            MenuChoice::AddResearcher => self.add_researcher().await,
            MenuChoice::AddProject => self.add_project().await,
            MenuChoice::AddPublication => self.add_publication().await,
            MenuChoice::ShowResearchers => self.show_researchers().await,
            MenuChoice::ShowProjects => self.show_projects().await,
            MenuChoice::ShowCollaborations => self.show_collaborations().await,
            MenuChoice::ShowProfile => self.show_profile().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    async fn add_researcher(&mut self) -> anyhow::Result<()> {
        let name = self.prompt.ask("Researcher Name")?;
        let department = self.prompt.ask("Department")?;
        let interests = parse_interests(&self.prompt.ask("Interests (comma separated)")?);

        let request = CreateResearcherRequest::new(name, department).with_interests(interests);
        self.records.create_researcher(request).await?;
        writeln!(self.out, "Researcher added")?;
        Ok(())
    }

    async fn add_project(&mut self) -> anyhow::Result<()> {
        let title = self.prompt.ask("Project Title")?;
        let description = self.prompt.ask("Project Description")?;

        let researchers = self.records.list_researchers().await?;
        if researchers.is_empty() {
            writeln!(self.out, "No researchers found. Add some first.")?;
            return Ok(());
        }
        self.print_numbered(&researchers)?;

        let selected = self.prompt.ask(
            "Select participants by number (comma separated, or leave empty)",
        )?;
        let mut request = CreateProjectRequest::new(title, description);
        for index in parse_selection(&selected, researchers.len()) {
            let researcher = &researchers[index];
            let relation = self.prompt.ask(&format!(
                "Enter relationship with {} (co-authorship / supervision / teamwork)",
                researcher.name
            ))?;
            request = request.with_participant(researcher.id, relation);
        }

        if is_yes(&self.prompt.ask("Do you want to add publications for this project? (y/n)")?) {
            let count = parse_count(&self.prompt.ask("How many publications?")?);
            for i in 1..=count {
                let title = self.prompt.ask(&format!("Publication {i} Title"))?;
                let year = parse_year(&self.prompt.ask("Year")?);
                request = request.with_publication(title, year);
            }
        }

        self.records.create_project(request).await?;
        writeln!(self.out, "Project added")?;
        Ok(())
    }

    async fn add_publication(&mut self) -> anyhow::Result<()> {
        let title = self.prompt.ask("Publication Title")?;
        let year = parse_year(&self.prompt.ask("Year")?);

        let researchers = self.records.list_researchers().await?;
        self.print_numbered(&researchers)?;
        let selected = self.prompt.ask("Select authors by number (comma separated)")?;
        let authors = parse_selection(&selected, researchers.len())
            .into_iter()
            .map(|index| researchers[index].id)
            .collect();

        let request = CreatePublicationRequest::new(title, year).with_authors(authors);
        self.records.create_publication(request).await?;
        writeln!(self.out, "Publication added")?;
        Ok(())
    }

    async fn show_researchers(&mut self) -> anyhow::Result<()> {
        for researcher in self.records.list_researchers().await? {
            writeln!(
                self.out,
                "\n{} | {} | Interests: {}",
                researcher.name,
                researcher.department,
                researcher.interests.join(", ")
            )?;
            self.print_publications(&researcher.publications)?;
        }
        Ok(())
    }

    async fn show_projects(&mut self) -> anyhow::Result<()> {
        for project in self.records.list_projects().await? {
            writeln!(self.out, "\n{} | {}", project.title, project.description)?;
            let names: Vec<&str> = project
                .participants
                .iter()
                .map(|r| r.name.as_str())
                .collect();
            writeln!(self.out, "Participants: {}", names.join(", "))?;
            self.print_publications(&project.publications)?;
        }
        Ok(())
    }

    async fn show_collaborations(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Collaborations:")?;
        for record in self.records.list_collaborations().await? {
            writeln!(
                self.out,
                "{} -[{}]-> {}",
                record.researcher,
                record.relation,
                record.target.as_deref().unwrap_or("?")
            )?;
        }
        Ok(())
    }

    async fn show_profile(&mut self) -> anyhow::Result<()> {
        let researchers = self.records.list_researchers().await?;
        if researchers.is_empty() {
            writeln!(self.out, "No researchers found. Add some first.")?;
            return Ok(());
        }
        self.print_numbered(&researchers)?;

        let selected = self.prompt.ask("Select a researcher by number")?;
        let Some(&index) = parse_selection(&selected, researchers.len()).first() else {
            writeln!(self.out, "Invalid selection.")?;
            return Ok(());
        };
        let Some(researcher) = self.records.researcher_record(researchers[index].id).await? else {
            writeln!(self.out, "Researcher no longer exists.")?;
            return Ok(());
        };

        let profile = self.profiles.get_profile(&researcher).await?;
        writeln!(self.out, "{}", serde_json::to_string_pretty(&profile)?)?;
        Ok(())
    }

    fn print_numbered(&mut self, researchers: &[PopulatedResearcher]) -> anyhow::Result<()> {
        writeln!(self.out, "Researchers:")?;
        for (i, researcher) in researchers.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, researcher.name)?;
        }
        Ok(())
    }

    fn print_publications(&mut self, publications: &[Publication]) -> anyhow::Result<()> {
        if publications.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "Publications:")?;
        for publication in publications {
            match publication.year {
                Some(year) => writeln!(self.out, " - {} ({year})", publication.title)?,
                None => writeln!(self.out, " - {}", publication.title)?,
            }
        }
        Ok(())
    }
}
