//! Built-in portfolio commands.
//!
//! Payloads are HTML fragments. Deployments replace them through the
//! `[commands]` table of the configuration file.

use crate::table::CommandTable;

/// Register all built-in commands into a table.
pub fn register_builtins(table: &mut CommandTable) {
    table.register("help", HELP);
    table.register("about", ABOUT);
    table.register("projects", PROJECTS);
    table.register("skills", SKILLS);
    table.register("experience", EXPERIENCE);
    table.register("contact", CONTACT);
    table.register("education", EDUCATION);
    table.register("certifications", CERTIFICATIONS);
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

const HELP: &str = "Available commands:<br />\
about - Learn about me<br />\
projects - View my projects<br />\
skills - See my technical skills<br />\
experience - My work experience<br />\
contact - How to reach me<br />\
education - My educational background<br />\
certifications - View my certifications<br />\
clear - Clear the terminal<br />\
<br />\
Type any command to continue...";

const ABOUT: &str = "<p>Hi, I'm a software developer!</p>\
<p>I build web and command-line tools, and I care about fast, \
accessible, user-centric interfaces.</p><br />\
<p>Background:<br />\
- Web development internship building course pages.<br />\
- Focus on responsive layouts and maintainable code.<br />\
- Comfortable across the stack, from markup to databases.</p><br />\
<p>Feel free to explore more using the 'projects', 'skills', or 'contact' commands!</p>";

const PROJECTS: &str = "Projects:<br />\
1. <a href=\"https://example.com/termfolio\" target=\"_blank\" rel=\"noopener noreferrer\" \
class=\"link\">Terminal Portfolio</a> - A terminal-style portfolio (this one!)<br />\
2. <a href=\"https://example.com/chat\" target=\"_blank\" rel=\"noopener noreferrer\" \
class=\"link\">Chat App</a> - A small real-time messaging client<br />\
3. <a href=\"https://example.com/notes\" target=\"_blank\" rel=\"noopener noreferrer\" \
class=\"link\">Notes</a> - Create, tag, and search notes in the browser<br />\
4. <a href=\"https://example.com/mole\" target=\"_blank\" rel=\"noopener noreferrer\" \
class=\"link\">Whack-a-Mole</a> - A browser game";

const SKILLS: &str = "Skills:<br />\
- Languages: HTML, CSS, JavaScript, Python, Rust<br />\
- Tools &amp; Frameworks: React, SQL, MongoDB, Git<br />\
- Web Development: Responsive Design, Troubleshooting, Accessibility";

const EXPERIENCE: &str = "Work Experience:<br />\
<b>Web Development Intern (Aug 2023 - Feb 2024)</b><br />\
- Developed and maintained responsive pages for online courses.<br />\
- Shipped updates that improved functionality and engagement.<br />\
- Resolved site issues to keep performance and user experience high.";

const CONTACT: &str = "Contact:<br />\
- Email: <a href=\"mailto:hello@example.com\" class=\"link\">hello@example.com</a><br />\
- LinkedIn: <a href=\"https://www.linkedin.com/in/example\" target=\"_blank\" \
rel=\"noopener noreferrer\" class=\"link\">linkedin.com/in/example</a><br />\
- GitHub: <a href=\"https://github.com/example\" target=\"_blank\" \
rel=\"noopener noreferrer\" class=\"link\">github.com/example</a>";

const EDUCATION: &str = "Education:<br />\
Bachelor of Science in Information Technology (2022 - 2025)";

const CERTIFICATIONS: &str = "Certifications:<br />\
- Journey to Cloud: Envisioning Your Solution<br />\
- Getting Started with Enterprise Data Science<br />\
- Emerging Technologies (AI &amp; Cloud) Internship<br />\
<i>Issued in collaboration with industry partners</i>";
