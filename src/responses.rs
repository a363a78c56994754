//! Wire-exact response text.
//!
//! Every constant here is quoted verbatim from spec.md §4.4/§8 (cross
//! checked against the Python reference implementation, which the spec's
//! wording tracks closely). None of these carry a trailing CRLF — the
//! framer appends line terminators, so these are plain text lines.

pub const CRLF: &str = "\r\n";
pub const DOT: &str = ".";

// Greeting
pub const READY_POSTING_ALLOWED: &str = "200 NNTP Service Ready, posting allowed";
pub const READY_POSTING_PROHIBITED: &str = "201 NNTP Service Ready, posting prohibited";

// Connection lifecycle
pub const CLOSING: &str = "205 Connection closing";

// Capabilities / help
pub const CAPABILITY_LIST: &str = "101 Capability list:";
pub const HELP_FOLLOWS: &str = "100 Help text follows";

// DATE
pub const DATE_PREFIX: &str = "111";

// GROUP / LISTGROUP
pub const NO_SUCH_NEWSGROUP: &str = "411 No such newsgroup";
pub const NO_NEWSGROUP_SELECTED: &str = "412 No newsgroup selected";

// LIST family
pub const LIST_FOLLOWS: &str = "215";

// Article retrieval
pub const ARTICLE_FOLLOWS: &str = "220";
pub const HEAD_FOLLOWS: &str = "221";
pub const BODY_FOLLOWS: &str = "222";
pub const ARTICLE_EXISTS: &str = "223";
pub const NO_ARTICLE_WITH_NUMBER: &str = "423 No article with that number";
pub const NO_ARTICLES_IN_RANGE: &str = "423 No articles in that range";
pub const NO_ARTICLE_WITH_MESSAGE_ID: &str = "430 No article with that message-id";
pub const NO_CURRENT_ARTICLE: &str = "420 Current article number is invalid";

// OVER / XOVER / HDR / XHDR
pub const OVERVIEW_FOLLOWS: &str = "224 Overview information follows (multi-line)";
pub const HEADERS_FOLLOW: &str = "225 Headers follow(multi-line)";

// NEWNEWS / NEWGROUPS
pub const NEWNEWS_FOLLOWS: &str = "230 list of new articles by message-id follows";
pub const NEWGROUPS_FOLLOWS: &str = "231 list of new newsgroups follows";

// POST
pub const SEND_ARTICLE: &str = "340 Input article; end with <CR-LF>.<CR-LF>";
pub const POSTING_NOT_PERMITTED: &str = "440 Posting not permitted";
pub const ARTICLE_RECEIVED: &str = "240 Article received OK";

// AUTHINFO
pub const ENTER_PASSPHRASE: &str = "381 Enter passphrase";
pub const AUTH_ACCEPTED: &str = "281 Authentication accepted";
pub const AUTH_OUT_OF_SEQUENCE: &str = "482 Authentication commands issued out of sequence";

// Generic command errors
pub const SYNTAX_ERROR: &str = "501 Syntax Error";
pub const UNKNOWN_COMMAND: &str = "500 Unknown command";
pub const COMMAND_UNAVAILABLE: &str = "502 Command unavailable";
pub const FACILITY_UNAVAILABLE: &str = "503 Facility not supported";

/// Fixed lines of the capability block, in order (before the conditional
/// `POST`/`AUTHINFO USER` lines).
pub const CAPABILITY_FIXED_LINES: &[&str] = &[
    "VERSION 2",
    "READER",
    "HDR",
    "NEWNEWS",
    "LIST ACTIVE NEWSGROUPS OVERVIEW.FMT SUBSCRIPTIONS",
    "OVER MSGID",
];

pub const CAPABILITY_POST: &str = "POST";
pub const CAPABILITY_AUTHINFO_USER: &str = "AUTHINFO USER";

/// Library-generated default help body used when the backend supplies no
/// help text of its own (spec.md §4.6 `help` optional capability).
pub const DEFAULT_HELP_BODY: &[&str] = &[
    "Legal commands",
    "  CAPABILITIES",
    "  MODE READER",
    "  DATE",
    "  GROUP name",
    "  LISTGROUP [name [range]]",
    "  LIST [ACTIVE|NEWSGROUPS|OVERVIEW.FMT|SUBSCRIPTIONS] [wildmat]",
    "  ARTICLE|HEAD|BODY|STAT [number|message-id]",
    "  OVER|XOVER [range|message-id]",
    "  HDR|XHDR field [range|message-id]",
    "  NEWNEWS wildmat date time [GMT]",
    "  NEWGROUPS date time [GMT]",
    "  POST",
    "  AUTHINFO USER name",
    "  AUTHINFO PASS password",
    "  QUIT",
];
