//! Static usage texts printed by `-h/--help`.

/// Usage text for `getpanfsacl`.
pub(crate) const GET_HELP_TEXT: &str = concat!(
    "getpanfsacl [-Rvdh] file ...\n",
    "\n",
    "DESCRIPTION\n",
    "\n",
    "  This utility displays the active Panasas Access Control Lists (ACLs) on\n",
    "  files and directories. The base owner, group and other permissions are\n",
    "  shown first, followed by the PanFS entries in deny-before-allow order.\n",
    "\n",
    "  An entry that carries only part of a composite permission is listed with\n",
    "  that permission and marked '(PARTIAL; missing ...)' with the absent native\n",
    "  tokens.\n",
    "\n",
    "OPTIONS\n",
    "  -R, --recursive\n",
    "       List the ACLs of all files and directories recursively.\n",
    "\n",
    "  -v, --verbose\n",
    "       Print the raw attribute value and note ignored object kinds.\n",
    "\n",
    "  -d, --debug\n",
    "       Debug mode.\n",
    "\n",
    "  -h, --help\n",
    "       Show this help.\n",
    "\n",
    "ENVIRONMENT\n",
    "  PANFSACL_XATTR\n",
    "       Extended attribute holding the ACL (default user.panfs.acl).\n",
);

/// Usage text for `setpanfsacl`.
pub(crate) const SET_HELP_TEXT: &str = concat!(
    "setpanfsacl [-bindRvh] [{-m|-x} acl_spec] file ...\n",
    "\n",
    "DESCRIPTION\n",
    "\n",
    "  This utility sets Panasas Access Control Lists (ACLs) of files and\n",
    "  directories. On the command line, a sequence of commands is followed by a\n",
    "  sequence of files.\n",
    "\n",
    "  Only additional access controls beyond the base entries for the owner, the\n",
    "  group, and others are modifiable by this tool. Use chmod/chown/chgrp to\n",
    "  change those.\n",
    "\n",
    "  The options -m and -x expect an ACL on the command line. The ACL entry\n",
    "  format is described in Section ACL ENTRIES.\n",
    "\n",
    "  The -m (--modify) option modifies the ACL of a file or directory. ACL\n",
    "  entries for this operation must include permissions. Any existing entry\n",
    "  for the same user or group is replaced.\n",
    "\n",
    "  The -x (--remove) option removes ACL entries. It is not an error to remove\n",
    "  an entry which does not exist. Only ACL entries without the perms field\n",
    "  are accepted as parameters.\n",
    "\n",
    "MAIN OPTIONS\n",
    "  -b, --remove-all\n",
    "       Remove all extended ACL entries. The base ACL entries of the owner,\n",
    "       group and others are retained.\n",
    "\n",
    "  -i, --inherit\n",
    "       ACLs set on directories using -m will be inherited by future files\n",
    "       and directories created in them.\n",
    "\n",
    "  -R, --recursive\n",
    "       Apply the changes to all files and directories recursively.\n",
    "\n",
    "  -n, --dry-run\n",
    "       Compute and report the changes without writing them.\n",
    "\n",
    "ADDITIONAL OPTIONS\n",
    "  -h, --help\n",
    "       Show this help.\n",
    "\n",
    "  -d, --debug\n",
    "       Debug mode.\n",
    "\n",
    "  -v, --verbose\n",
    "       Print changes.\n",
    "\n",
    "ACL ENTRIES\n",
    "  The following ACL entry formats are recognized (blanks inserted for\n",
    "  clarity):\n",
    "\n",
    "  [+-][u[ser]:]uid[:perms]\n",
    "       Permissions of a named user.\n",
    "\n",
    "  [+-]g[roup]:gid[:perms]\n",
    "       Permissions of a named group.\n",
    "\n",
    "  The first symbol may be '+', indicating 'allow', or '-', indicating\n",
    "  'deny'. Defaults to '+'. All 'deny' ACLs take precedence over any 'allow'\n",
    "  ACLs.\n",
    "\n",
    "  For uid and gid you can specify either a name or a number.\n",
    "\n",
    "  The perms field is a combination of characters that indicate the\n",
    "  permissions: read (r), write (w), execute (x), execute only if the file is\n",
    "  a directory or already has execute permission for the invoking user (X).\n",
    "\n",
    "EXAMPLES\n",
    "  # Allow user 'abc123' to traverse directory 'directory_name' but not read it\n",
    "\n",
    "    setpanfsacl -m +user:abc123:X directory_name\n",
    "\n",
    "  # Set read-only permission for groupABC on directory_name, all files in it\n",
    "  # and existing sub-directories. Files created later do not get the ACL\n",
    "\n",
    "    setpanfsacl -R -m +group:groupABC:r directory_name\n",
    "\n",
    "  # Give user 'abc456' permission to read, write and execute 'script_name'\n",
    "  # (requires script_name to already be executable)\n",
    "\n",
    "    setpanfsacl -m +u:abc456:rwX script_name\n",
    "\n",
    "  # Give group 'groupCDE' read and write on 'directory_name' and make new\n",
    "  # files or directories created under it inherit this permission\n",
    "\n",
    "    setpanfsacl -i -m +g:groupCDE:rw directory_name\n",
    "\n",
    "  # Deny user 'xyz789' permission to read or write 'data_file'\n",
    "\n",
    "    setpanfsacl -m -u:xyz789:rw data_file\n",
    "\n",
    "ENVIRONMENT\n",
    "  PANFSACL_XATTR\n",
    "       Extended attribute holding the ACL (default user.panfs.acl).\n",
    "\n",
    "NOTES\n",
    "\n",
    "  Always test that the ACLs perform as expected.\n",
);

/// Message printed when no path operands were supplied.
pub(crate) const MISSING_FILE_TEXT: &str = "Missing file argument (try --help)";
