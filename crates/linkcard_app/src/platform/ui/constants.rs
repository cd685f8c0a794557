pub const PROMPT: &str = "linkcard> ";

pub const BANNER: &str = "Link to image card. Type `help` for commands.";

pub const HELP_TEXT: &str = "\
Commands:
  url <address>        set the page address (scheme optional)
  style white|wechat   choose the card style
  title [text]         custom title, empty to use the page title
  description [text]   custom description (alias: desc)
  submit               generate the card
  copy                 copy the card image to the clipboard
  download             save the card image to the output directory
  wait                 block until pending work has finished
  show                 print the current form and result
  help                 print this text
  quit                 leave (alias: exit)";
