//! Interactive numbered menu over stdin/stdout.
//!
//! The menu only collects input and prints results. Store and export
//! failures are printed and the menu continues; only console I/O errors end
//! it early.

use std::io::{self, BufRead, Write};

use rolodex::prelude::*;

const MENU: &str = "\
Select an option:
1. Add contact
2. List contacts
3. Find contact
4. Update contact
5. Delete contact
6. Export to CSV
7. Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Add,
    List,
    Find,
    Update,
    Delete,
    Export,
    Quit,
}

impl MenuOption {
    fn from_selection(selection: &str) -> Option<Self> {
        match selection.trim().parse::<u8>().ok()? {
            1 => Some(MenuOption::Add),
            2 => Some(MenuOption::List),
            3 => Some(MenuOption::Find),
            4 => Some(MenuOption::Update),
            5 => Some(MenuOption::Delete),
            6 => Some(MenuOption::Export),
            7 => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

/// One line of the contact listing, numbered from 1.
pub fn contact_line(position: usize, contact: &Contact) -> String {
    format!(
        "Contact {}: {}, Phone: {}, Address: {}",
        position, contact.name, contact.phone, contact.address
    )
}

/// Run the menu until the user quits or input ends.
pub fn run_menu<R: BufRead, W: Write>(store: &ContactStore, input: R, output: W) -> io::Result<()> {
    let mut console = Console { input, output };

    loop {
        writeln!(console.output, "{}", MENU)?;

        let Some(selection) = console.read_line()? else {
            break;
        };

        let Some(option) = MenuOption::from_selection(&selection) else {
            writeln!(console.output, "Invalid option, try again.")?;
            continue;
        };

        if option == MenuOption::Quit {
            break;
        }

        match console.run_option(store, option) {
            Ok(()) => {}
            // Input closed in the middle of a prompt.
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }

    writeln!(console.output, "Exiting...")?;
    console.output.flush()
}

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }

    fn run_option(&mut self, store: &ContactStore, option: MenuOption) -> io::Result<()> {
        match option {
            MenuOption::Add => self.add(store),
            MenuOption::List => self.list(store),
            MenuOption::Find => self.find(store),
            MenuOption::Update => self.update(store),
            MenuOption::Delete => self.delete(store),
            MenuOption::Export => self.export(store),
            MenuOption::Quit => Ok(()),
        }
    }

    fn add(&mut self, store: &ContactStore) -> io::Result<()> {
        let name = self.prompt("Name: ")?;
        let phone = self.prompt("Phone: ")?;
        let address = self.prompt("Address: ")?;

        match store.add(&name, &phone, &address) {
            Ok(contact) => writeln!(self.output, "Contact added: {}", contact.name),
            Err(e) => writeln!(self.output, "Error adding contact: {}", e),
        }
    }

    fn list(&mut self, store: &ContactStore) -> io::Result<()> {
        match store.list() {
            Ok(contacts) if contacts.is_empty() => writeln!(self.output, "No contacts."),
            Ok(contacts) => {
                for (i, contact) in contacts.iter().enumerate() {
                    writeln!(self.output, "{}", contact_line(i + 1, contact))?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "Error listing contacts: {}", e),
        }
    }

    fn find(&mut self, store: &ContactStore) -> io::Result<()> {
        let name = self.prompt("Name of the contact to find: ")?;

        match store.find(&name) {
            Ok(Some(contact)) => writeln!(self.output, "Contact found: {}", contact),
            Ok(None) => writeln!(self.output, "Contact not found: {}", name),
            Err(e) => writeln!(self.output, "Error finding contact: {}", e),
        }
    }

    fn update(&mut self, store: &ContactStore) -> io::Result<()> {
        let original = self.prompt("Name of the contact to update: ")?;
        let name = self.prompt("New name: ")?;
        let phone = self.prompt("New phone: ")?;
        let address = self.prompt("New address: ")?;

        match store.update(&original, &name, &phone, &address) {
            Ok(contact) => writeln!(self.output, "Contact updated: {}", contact.name),
            Err(e) if e.is_not_found() => {
                writeln!(self.output, "Contact not found for update: {}", original)
            }
            Err(e) => writeln!(self.output, "Error updating contact: {}", e),
        }
    }

    fn delete(&mut self, store: &ContactStore) -> io::Result<()> {
        let name = self.prompt("Name of the contact to delete: ")?;

        match store.delete(&name) {
            Ok(contact) => writeln!(self.output, "Contact deleted: {}", contact.name),
            Err(e) if e.is_not_found() => {
                writeln!(self.output, "Contact not found for delete: {}", name)
            }
            Err(e) => writeln!(self.output, "Error deleting contact: {}", e),
        }
    }

    fn export(&mut self, store: &ContactStore) -> io::Result<()> {
        let path = self.prompt("CSV file path: ")?;

        match TableExporter::new(store).export_to_path(&path) {
            Ok(_) => writeln!(self.output, "Contacts exported to CSV: {}", path),
            Err(e) => writeln!(self.output, "Error exporting contacts to CSV: {}", e),
        }
    }
}
